#![warn(missing_docs)]

//! Library behind the sphray viewer: a first-person camera, a small sphere scene and a renderer
//! that hands both to a ray-tracing fragment shader every frame.

pub mod app;
pub mod backend;
pub mod camera;
pub mod color;
pub mod config;
pub mod input;
pub mod layout;
pub mod logging;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod time;
pub mod vector;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        camera::Camera,
        color::Color,
        config::Config,
        input::{transition, Controls, InputEvent, ViewState},
        renderer::{Renderer, Status},
        scene::{Material, Scene, Sphere},
        vector::{Vec3, Vector},
        Building, Built,
    };
}

macro_rules! states {
    {$($(#[$attr:meta])* $state:ident),+ $(,)?} => {
        $(
            #[derive(Clone, Debug, Default)]
            $(#[$attr])*
            pub struct $state;
        )+
    };
}

states! {
    /// Contents can still be added or changed.
    Building,
    /// Contents are fixed and validated, ready to be handed to the GPU.
    Built,
}
