//! [Backend] implementation over the `gl` crate.

use std::{
    ffi::{c_void, CStr, CString},
    marker::PhantomData,
    mem::{size_of, size_of_val},
    ptr,
};

use gl::types::{GLchar, GLint, GLsizeiptr, GLuint};

use super::{
    Backend, BufferId, Mesh, ProgramId, ShaderId, ShaderStage, Uniform, UniformLocation,
    VertexArrayId, VertexAttribute,
};
use crate::{color::Color, shader::Error};

#[derive(Debug)]
/// OpenGL function table bound to the context that was current when it was loaded.
///
/// Not `Send`: GL calls must come from the thread owning the context.
pub struct GlBackend {
    _context: PhantomData<*const ()>,
}

impl GlBackend {
    /// Load every GL entry point through `loader` and check the ones this crate calls.
    ///
    /// Returns the name of the first missing function on failure. A context must be current.
    pub fn load(loader: impl FnMut(&'static str) -> *const c_void) -> Result<Self, &'static str> {
        gl::load_with(loader);

        let required = [
            ("glClear", gl::Clear::is_loaded()),
            ("glViewport", gl::Viewport::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glGenBuffers", gl::GenBuffers::is_loaded()),
            ("glBindBufferBase", gl::BindBufferBase::is_loaded()),
            ("glUniform3fv", gl::Uniform3fv::is_loaded()),
            ("glDrawArrays", gl::DrawArrays::is_loaded()),
        ];

        match required.into_iter().find(|(_, loaded)| !loaded) {
            Some((name, _)) => Err(name),
            None => Ok(Self {
                _context: PhantomData,
            }),
        }
    }

    /// `GL_VERSION` string of the current context.
    pub fn version(&self) -> Option<String> {
        get_string(gl::VERSION)
    }

    /// `GL_RENDERER` string of the current context.
    pub fn renderer(&self) -> Option<String> {
        get_string(gl::RENDERER)
    }
}

fn get_string(name: gl::types::GLenum) -> Option<String> {
    unsafe {
        let raw = gl::GetString(name);
        if raw.is_null() {
            return None;
        }

        Some(CStr::from_ptr(raw.cast()).to_string_lossy().into_owned())
    }
}

fn info_log(
    object: GLuint,
    get_iv: unsafe fn(GLuint, gl::types::GLenum, *mut GLint),
    get_log: unsafe fn(GLuint, gl::types::GLsizei, *mut gl::types::GLsizei, *mut GLchar),
) -> String {
    unsafe {
        let mut len = 0;
        get_iv(object, gl::INFO_LOG_LENGTH, &mut len);

        let mut buffer = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        get_log(object, len, &mut written, buffer.as_mut_ptr().cast());
        buffer.truncate(written.max(0) as usize);

        String::from_utf8_lossy(&buffer).trim_end().to_owned()
    }
}

impl ShaderStage {
    fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Backend for GlBackend {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, Error> {
        let source = CString::new(source).map_err(|_| Error::InvalidSource(stage))?;

        unsafe {
            let Some(shader) = ShaderId::new(gl::CreateShader(stage.gl_enum())) else {
                return Err(Error::Compile {
                    stage,
                    log: "glCreateShader returned no object".to_owned(),
                });
            };

            gl::ShaderSource(shader.get(), 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader.get());

            let mut status = 0;
            gl::GetShaderiv(shader.get(), gl::COMPILE_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = info_log(shader.get(), gl::GetShaderiv, gl::GetShaderInfoLog);
                gl::DeleteShader(shader.get());
                return Err(Error::Compile { stage, log });
            }

            Ok(shader)
        }
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, Error> {
        unsafe {
            let Some(program) = ProgramId::new(gl::CreateProgram()) else {
                return Err(Error::Link("glCreateProgram returned no object".to_owned()));
            };

            gl::AttachShader(program.get(), vertex.get());
            gl::AttachShader(program.get(), fragment.get());
            gl::LinkProgram(program.get());

            let mut status = 0;
            gl::GetProgramiv(program.get(), gl::LINK_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = info_log(program.get(), gl::GetProgramiv, gl::GetProgramInfoLog);
                gl::DeleteProgram(program.get());
                return Err(Error::Link(log));
            }

            gl::DetachShader(program.get(), vertex.get());
            gl::DetachShader(program.get(), fragment.get());

            Ok(program)
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader.get()) }
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { gl::DeleteProgram(program.get()) }
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(program.get(), name.as_ptr()) };
        (location >= 0).then_some(UniformLocation(location))
    }

    fn create_mesh(
        &mut self,
        vertices: &[f32],
        stride: usize,
        attributes: &[VertexAttribute],
    ) -> Option<Mesh> {
        unsafe {
            let mut vao = 0;
            gl::GenVertexArrays(1, &mut vao);
            let vertex_array = VertexArrayId::new(vao)?;

            let mut vbo = 0;
            gl::GenBuffers(1, &mut vbo);
            let Some(vertex_buffer) = BufferId::new(vbo) else {
                gl::DeleteVertexArrays(1, &vao);
                return None;
            };

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size_of_val(vertices) as GLsizeiptr,
                vertices.as_ptr().cast(),
                gl::STATIC_DRAW,
            );

            for attribute in attributes {
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components,
                    gl::FLOAT,
                    gl::FALSE,
                    (stride * size_of::<f32>()) as GLint,
                    (attribute.offset * size_of::<f32>()) as *const c_void,
                );
                gl::EnableVertexAttribArray(attribute.location);
            }

            gl::BindVertexArray(0);

            Some(Mesh {
                vertex_array,
                vertex_buffer,
            })
        }
    }

    fn delete_mesh(&mut self, mesh: Mesh) {
        unsafe {
            gl::DeleteVertexArrays(1, &mesh.vertex_array.get());
            gl::DeleteBuffers(1, &mesh.vertex_buffer.get());
        }
    }

    fn create_buffer(&mut self) -> Option<BufferId> {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        BufferId::new(buffer)
    }

    fn upload_storage(&mut self, buffer: BufferId, binding: u32, bytes: &[u8]) {
        let data = if bytes.is_empty() {
            ptr::null()
        } else {
            bytes.as_ptr().cast()
        };

        unsafe {
            gl::BindBuffer(gl::SHADER_STORAGE_BUFFER, buffer.get());
            gl::BufferData(
                gl::SHADER_STORAGE_BUFFER,
                bytes.len() as GLsizeiptr,
                data,
                gl::DYNAMIC_DRAW,
            );
            gl::BindBufferBase(gl::SHADER_STORAGE_BUFFER, binding, buffer.get());
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        unsafe { gl::DeleteBuffers(1, &buffer.get()) }
    }

    fn clear(&mut self, colour: Color) {
        unsafe {
            gl::ClearColor(colour.r, colour.g, colour.b, 1.);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as GLint, height as GLint) }
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe { gl::UseProgram(program.get()) }
    }

    fn set_uniform(&mut self, UniformLocation(location): UniformLocation, value: Uniform) {
        unsafe {
            match value {
                Uniform::Int(v) => gl::Uniform1i(location, v),
                Uniform::Vec2([x, y]) => gl::Uniform2f(location, x, y),
                Uniform::Vec3(v) => gl::Uniform3fv(location, 1, v.as_ptr()),
            }
        }
    }

    fn draw_triangle_strip(&mut self, mesh: &Mesh, count: i32) {
        unsafe {
            gl::BindVertexArray(mesh.vertex_array.get());
            gl::DrawArrays(gl::TRIANGLE_STRIP, 0, count);
        }
    }
}
