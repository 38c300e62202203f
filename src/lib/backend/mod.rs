//! The slice of the graphics API the renderer talks to.
//!
//! [GlBackend] issues the real OpenGL calls. Tests swap in a recorder so the renderer and shader
//! loader can be exercised without a context.

mod opengl;
#[cfg(test)]
pub(crate) mod recording;

pub use self::opengl::GlBackend;

use std::num::NonZeroU32;

use crate::{color::Color, shader};

macro_rules! handles {
    {$($(#[$attr:meta])* $handle:ident),+ $(,)?} => {
        $(
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            $(#[$attr])*
            pub struct $handle(NonZeroU32);

            impl $handle {
                /// Wrap a raw object name. Zero is never a live object and yields `None`.
                pub fn new(raw: u32) -> Option<Self> {
                    NonZeroU32::new(raw).map(Self)
                }

                /// Raw object name.
                pub fn get(self) -> u32 {
                    self.0.get()
                }
            }
        )+
    };
}

handles! {
    /// A compiled shader stage.
    ShaderId,
    /// A linked program.
    ProgramId,
    /// A buffer object.
    BufferId,
    /// A vertex array object.
    VertexArrayId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Resolved location of a named uniform inside a program.
pub struct UniformLocation(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
#[allow(missing_docs)]
/// Programmable pipeline stage.
pub enum ShaderStage {
    #[display(fmt = "vertex")]
    Vertex,
    #[display(fmt = "fragment")]
    Fragment,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
/// Value assigned to a uniform.
pub enum Uniform {
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One float vertex attribute inside an interleaved vertex buffer.
pub struct VertexAttribute {
    /// Shader `layout(location = ..)`.
    pub location: u32,
    /// Number of floats.
    pub components: i32,
    /// Offset from the start of the vertex, in floats.
    pub offset: usize,
}

#[derive(Debug, PartialEq, Eq)]
/// Static geometry living in a vertex array and its backing buffer.
pub struct Mesh {
    #[allow(missing_docs)]
    pub vertex_array: VertexArrayId,
    #[allow(missing_docs)]
    pub vertex_buffer: BufferId,
}

/// Graphics calls needed to load programs, upload the scene and draw a quad.
///
/// Calls are fire-and-forget; nothing waits on the device.
pub trait Backend {
    /// Compile one stage from source.
    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderId, shader::Error>;
    /// Link a vertex and a fragment stage. The program is discarded on failure.
    fn link_program(
        &mut self,
        vertex: ShaderId,
        fragment: ShaderId,
    ) -> Result<ProgramId, shader::Error>;
    #[allow(missing_docs)]
    fn delete_shader(&mut self, shader: ShaderId);
    #[allow(missing_docs)]
    fn delete_program(&mut self, program: ProgramId);

    /// Look up a uniform. `None` when the program has no active uniform by that name.
    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Upload interleaved float vertices, `stride` floats per vertex, as static geometry.
    fn create_mesh(
        &mut self,
        vertices: &[f32],
        stride: usize,
        attributes: &[VertexAttribute],
    ) -> Option<Mesh>;
    #[allow(missing_docs)]
    fn delete_mesh(&mut self, mesh: Mesh);

    /// Allocate an empty buffer object.
    fn create_buffer(&mut self) -> Option<BufferId>;
    /// Replace the whole content of `buffer` with `bytes` and bind it as storage buffer `binding`.
    fn upload_storage(&mut self, buffer: BufferId, binding: u32, bytes: &[u8]);
    #[allow(missing_docs)]
    fn delete_buffer(&mut self, buffer: BufferId);

    /// Clear the colour buffer.
    fn clear(&mut self, colour: Color);
    #[allow(missing_docs)]
    fn set_viewport(&mut self, width: u32, height: u32);
    #[allow(missing_docs)]
    fn use_program(&mut self, program: ProgramId);
    /// Set a uniform on the program in use.
    fn set_uniform(&mut self, location: UniformLocation, value: Uniform);
    /// Draw the first `count` vertices of `mesh` as a triangle strip.
    fn draw_triangle_strip(&mut self, mesh: &Mesh, count: i32);
}
