//! GPU-side record layout for the sphere storage buffer.
//!
//! Mirrors this std430 declaration in `shaders/fragment.glsl`:
//!
//! ```glsl
//! struct Material { vec3 colour; float _pad0; vec3 emission; float _pad1; };
//! struct Sphere   { vec3 position; float radius; Material material; };
//! ```
//!
//! Each `vec3` starts a new 16-byte group. A field landing anywhere else silently scrambles
//! what the shader reads, so every offset is pinned below and checked in tests.

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};

use crate::scene::Sphere;

/// Byte size of one [SphereRecord].
pub const RECORD_SIZE: usize = 48;

/// Storage buffer binding point the shader declares for its sphere array.
pub const SPHERE_BINDING: u32 = 0;

#[allow(missing_docs)]
/// Byte offsets of each field inside a [SphereRecord].
pub mod offsets {
    pub const POSITION: usize = 0;
    pub const RADIUS: usize = 12;
    pub const COLOUR: usize = 16;
    pub const EMISSION: usize = 32;
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[allow(missing_docs)]
/// One sphere as the shader sees it.
pub struct SphereRecord {
    pub position: [f32; 3],
    pub radius: f32,
    pub colour: [f32; 3],
    _pad0: f32,
    pub emission: [f32; 3],
    _pad1: f32,
}

const _: () = assert!(size_of::<SphereRecord>() == RECORD_SIZE);

impl From<&Sphere> for SphereRecord {
    fn from(sphere: &Sphere) -> Self {
        Self {
            position: sphere.position.into(),
            radius: sphere.radius,
            colour: sphere.material.colour.into(),
            _pad0: 0.,
            emission: sphere.material.emission.into(),
            _pad1: 0.,
        }
    }
}

/// Serialize spheres into the exact bytes uploaded to the storage buffer.
///
/// Padding is always zeroed so equal inputs give equal bytes.
pub fn encode(spheres: &[Sphere]) -> Vec<u8> {
    let records = spheres.iter().map(SphereRecord::from).collect::<Vec<_>>();
    bytemuck::cast_slice(&records).to_vec()
}
