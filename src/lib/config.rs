//! Startup constants, grouped so the binary can tweak them in one place.

use std::path::PathBuf;

use crate::{color::Color, input::Controls, logging::LoggingConfig};

#[derive(Clone, Debug)]
/// Everything needed to bring the application up.
pub struct Config {
    #[allow(missing_docs)]
    pub window: WindowConfig,
    #[allow(missing_docs)]
    pub shaders: ShaderPaths,
    #[allow(missing_docs)]
    pub controls: Controls,
    #[allow(missing_docs)]
    pub scene: SceneConfig,
    #[allow(missing_docs)]
    pub logging: LoggingConfig,
    /// Colour the frame is cleared to before the quad is drawn.
    pub clear_colour: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: Default::default(),
            shaders: Default::default(),
            controls: Default::default(),
            scene: Default::default(),
            logging: Default::default(),
            clear_colour: Color::BLACK,
        }
    }
}

#[derive(Clone, Debug)]
/// Window and context creation parameters.
pub struct WindowConfig {
    /// Width in screen coordinates.
    pub width: u32,
    /// Height in screen coordinates.
    pub height: u32,
    #[allow(missing_docs)]
    pub title: String,
    /// Requested core profile `(major, minor)`. Storage buffers need at least 4.3.
    pub gl_version: (u32, u32),
    #[allow(missing_docs)]
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "ray-tracing".to_owned(),
            gl_version: (4, 3),
            resizable: false,
        }
    }
}

#[derive(Clone, Debug)]
/// Shader source files, read once at startup.
pub struct ShaderPaths {
    #[allow(missing_docs)]
    pub vertex: PathBuf,
    #[allow(missing_docs)]
    pub fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/vertex.glsl"),
            fragment: PathBuf::from("shaders/fragment.glsl"),
        }
    }
}

#[derive(Clone, Debug)]
/// Fixed sphere arrangement: `count` spheres starting at `start_x`, `spacing` apart along X,
/// all at `depth` on Z, radius growing by `radius_increment` each step.
#[allow(missing_docs)]
pub struct SceneConfig {
    pub count: usize,
    pub start_x: f32,
    pub spacing: f32,
    pub depth: f32,
    pub base_radius: f32,
    pub radius_increment: f32,
    /// Colours assigned in order, wrapping around when there are more spheres than colours.
    pub palette: Vec<Color>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            count: 3,
            start_x: -2.,
            spacing: 2.,
            depth: -3.,
            base_radius: 0.3,
            radius_increment: 0.2,
            palette: vec![Color::RED, Color::GREEN, Color::BLUE],
        }
    }
}
