//! Frame timing.

/// Longest frame step handed to the camera, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.25;

#[derive(Clone, Debug, Default)]
/// Turns a monotonic timer reading into per-frame deltas.
///
/// The first tick yields zero. Later deltas are clamped to `0..=MAX_FRAME_TIME` so a stall
/// (window drag, debugger break) does not fling the camera across the scene.
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the timer reading `now` (seconds) and return the time since the previous tick.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = self
            .last
            .map_or(0., |last| ((now - last) as f32).clamp(0., MAX_FRAME_TIME));
        self.last = Some(now);
        dt
    }
}
