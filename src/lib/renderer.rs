//! Owner of every GPU resource and the per-frame draw.

use log::{debug, error, info, warn};

use crate::{
    backend::{Backend, BufferId, Mesh, ProgramId, Uniform, UniformLocation, VertexAttribute},
    camera::Camera,
    color::Color,
    config::Config,
    layout::{self, SPHERE_BINDING},
    scene::Scene,
    shader, Built,
};

/// Fullscreen quad as a 4-vertex triangle strip, `x, y, u, v` per vertex.
pub const QUAD_VERTICES: [f32; 16] = [
    -1., -1., 0., 0., // Bottom-left
    1., -1., 1., 0., // Bottom-right
    -1., 1., 0., 1., // Top-left
    1., 1., 1., 1., // Top-right
];

const QUAD_STRIDE: usize = 4;
const QUAD_VERTEX_COUNT: i32 = 4;

const QUAD_ATTRIBUTES: [VertexAttribute; 2] = [
    // Position
    VertexAttribute {
        location: 0,
        components: 2,
        offset: 0,
    },
    // UV
    VertexAttribute {
        location: 1,
        components: 2,
        offset: 2,
    },
];

#[allow(missing_docs)]
/// Uniform names declared by `shaders/fragment.glsl`.
pub mod uniform_names {
    pub const CAMERA_POSITION: &str = "uCameraPosition";
    pub const CAMERA_FORWARD: &str = "uCameraForward";
    pub const CAMERA_RIGHT: &str = "uCameraRight";
    pub const CAMERA_UP: &str = "uCameraUp";
    pub const RESOLUTION: &str = "uResolution";
    pub const SPHERE_COUNT: &str = "uNumSpheres";
}

#[derive(Clone, Copy, Debug, Default)]
struct Uniforms {
    camera_position: Option<UniformLocation>,
    camera_forward: Option<UniformLocation>,
    camera_right: Option<UniformLocation>,
    camera_up: Option<UniformLocation>,
    resolution: Option<UniformLocation>,
    sphere_count: Option<UniformLocation>,
}

impl Uniforms {
    fn resolve<B: Backend>(backend: &mut B, program: ProgramId) -> Self {
        let mut lookup = |name: &str| {
            let location = backend.uniform_location(program, name);
            if location.is_none() {
                // The driver strips uniforms the shader never reads.
                warn!(
                    "Uniform `{name}` is not active in program {}",
                    program.get()
                );
            }
            location
        };

        Self {
            camera_position: lookup(uniform_names::CAMERA_POSITION),
            camera_forward: lookup(uniform_names::CAMERA_FORWARD),
            camera_right: lookup(uniform_names::CAMERA_RIGHT),
            camera_up: lookup(uniform_names::CAMERA_UP),
            resolution: lookup(uniform_names::RESOLUTION),
            sphere_count: lookup(uniform_names::SPHERE_COUNT),
        }
    }
}

fn set_uniform<B: Backend>(backend: &mut B, location: Option<UniformLocation>, value: Uniform) {
    if let Some(location) = location {
        backend.set_uniform(location, value);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SceneBuffer {
    Unallocated,
    Allocated(BufferId),
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether [Renderer::render] draws anything.
pub enum Status {
    /// Program linked and quad allocated.
    Ready,
    /// A GPU resource could not be created. Rendering is a no-op for the rest of the process.
    Disabled,
}

/// Holds the program, quad, scene buffer and cached uniform locations.
///
/// Program and quad are acquired in [new](Self::new), the scene buffer on the first frame.
/// Everything acquired is released exactly once on drop, including after a failure.
pub struct Renderer<B: Backend> {
    backend: B,

    program: Option<ProgramId>,
    quad: Option<Mesh>,
    scene_buffer: SceneBuffer,
    uniforms: Uniforms,

    scene: Scene<Built>,
    resolution: (u32, u32),
    clear_colour: Color,
}

impl<B: Backend> Renderer<B> {
    /// Load the program, build the quad and cache uniform locations.
    ///
    /// Never fails: a shader that cannot be read, compiled or linked is logged and leaves the
    /// renderer [Disabled](Status::Disabled).
    pub fn new(mut backend: B, config: &Config, scene: Scene<Built>) -> Self {
        let program = match shader::load_program(&mut backend, &config.shaders) {
            Ok(program) => Some(program),
            Err(error) => {
                error!("Failed to create shader program: {error}");
                None
            }
        };

        let quad = backend.create_mesh(&QUAD_VERTICES, QUAD_STRIDE, &QUAD_ATTRIBUTES);
        if quad.is_none() {
            error!("Failed to allocate the fullscreen quad");
        }

        let uniforms = program
            .map(|program| Uniforms::resolve(&mut backend, program))
            .unwrap_or_default();

        let renderer = Self {
            backend,
            program,
            quad,
            scene_buffer: SceneBuffer::Unallocated,
            uniforms,
            scene,
            resolution: (config.window.width, config.window.height),
            clear_colour: config.clear_colour,
        };

        match renderer.status() {
            Status::Ready => info!("Renderer ready with {} spheres", renderer.scene.len()),
            Status::Disabled => warn!("Renderer disabled, frames will not be drawn"),
        }

        renderer
    }

    #[allow(missing_docs)]
    pub fn status(&self) -> Status {
        let buffer_ok = self.scene_buffer != SceneBuffer::Failed;
        if self.program.is_some() && self.quad.is_some() && buffer_ok {
            Status::Ready
        } else {
            Status::Disabled
        }
    }

    /// Swap the scene. Takes effect on the next [render](Self::render).
    pub fn set_scene(&mut self, scene: Scene<Built>) {
        self.scene = scene;
    }

    /// Viewport size in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Track a new framebuffer size.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("Viewport resized to {width}x{height}");
        self.resolution = (width, height);
        self.backend.set_viewport(width, height);
    }

    /// Draw one frame seen from `camera`. Does nothing when [Disabled](Status::Disabled).
    pub fn render(&mut self, camera: &Camera) {
        let (Some(program), Status::Ready) = (self.program, self.status()) else {
            return;
        };

        self.backend.clear(self.clear_colour);
        self.backend.use_program(program);

        let (width, height) = self.resolution;
        set_uniform(
            &mut self.backend,
            self.uniforms.resolution,
            Uniform::Vec2([width as f32, height as f32]),
        );

        if !self.upload_scene() {
            return;
        }

        for (location, value) in [
            (self.uniforms.camera_position, camera.position),
            (self.uniforms.camera_forward, camera.forward()),
            (self.uniforms.camera_right, camera.right()),
            (self.uniforms.camera_up, camera.up()),
        ] {
            set_uniform(&mut self.backend, location, Uniform::Vec3(value.into()));
        }

        if let Some(quad) = &self.quad {
            self.backend.draw_triangle_strip(quad, QUAD_VERTEX_COUNT);
        }
    }

    /// Replace the storage buffer content with the whole scene and publish the sphere count.
    ///
    /// Returns `false` when there is no buffer to upload into. Allocation is attempted once.
    fn upload_scene(&mut self) -> bool {
        let buffer = match self.scene_buffer {
            SceneBuffer::Allocated(buffer) => buffer,
            SceneBuffer::Failed => return false,
            SceneBuffer::Unallocated => match self.backend.create_buffer() {
                Some(buffer) => {
                    self.scene_buffer = SceneBuffer::Allocated(buffer);
                    buffer
                }
                None => {
                    error!("Failed to allocate the scene buffer, rendering disabled");
                    self.scene_buffer = SceneBuffer::Failed;
                    return false;
                }
            },
        };

        let bytes = layout::encode(self.scene.spheres());
        self.backend.upload_storage(buffer, SPHERE_BINDING, &bytes);

        set_uniform(
            &mut self.backend,
            self.uniforms.sphere_count,
            Uniform::Int(self.scene.len() as i32),
        );

        true
    }
}

impl<B: Backend> Drop for Renderer<B> {
    fn drop(&mut self) {
        if let Some(quad) = self.quad.take() {
            self.backend.delete_mesh(quad);
        }
        let scene_buffer = std::mem::replace(&mut self.scene_buffer, SceneBuffer::Unallocated);
        if let SceneBuffer::Allocated(buffer) = scene_buffer {
            self.backend.delete_buffer(buffer);
        }
        if let Some(program) = self.program.take() {
            self.backend.delete_program(program);
        }
    }
}
