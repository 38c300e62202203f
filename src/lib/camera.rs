//! First-person camera driven by yaw and pitch angles.

use crate::vector::Vec3;

/// Pitch is kept within `±PITCH_LIMIT` degrees so `forward` never lines up with world up.
pub const PITCH_LIMIT: f32 = 89.;

/// Yaw of a freshly constructed camera, in degrees. Looks down -Z.
pub const DEFAULT_YAW: f32 = -90.;

#[derive(Clone, Copy, Debug, PartialEq)]
/// A 3D camera.
///
/// `yaw` and `pitch` are the source of truth. The basis vectors are only ever derived from them
/// by [update_orientation](Self::update_orientation), which callers run explicitly after
/// changing either angle.
pub struct Camera {
    /// Position in world units.
    pub position: Vec3,
    /// Rotation around world up, in degrees.
    pub yaw: f32,
    /// Elevation, in degrees.
    pub pitch: f32,

    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, DEFAULT_YAW, 0.)
    }
}

impl Camera {
    /// Create a camera and compute its basis right away.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            yaw,
            pitch,
            forward: Vec3::ZERO,
            right: Vec3::ZERO,
            up: Vec3::ZERO,
        };
        camera.update_orientation();
        camera
    }

    /// Recompute `forward`, `right` and `up` from the current yaw and pitch.
    pub fn update_orientation(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.forward = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        self.right = self.forward.cross_product(&Vec3::Y).normalize();
        self.up = self.right.cross_product(&self.forward).normalize();
    }

    /// Bring pitch back within `±PITCH_LIMIT`. Does not touch the basis.
    pub fn clamp_pitch(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    #[inline]
    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[inline]
    /// Unit vector to the right of the view direction, always horizontal.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    #[inline]
    /// Unit camera-local up.
    pub fn up(&self) -> Vec3 {
        self.up
    }
}
