//! Context-free [Backend] that records every call for inspection in tests.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::{
    Backend, BufferId, Mesh, ProgramId, ShaderId, ShaderStage, Uniform, UniformLocation,
    VertexArrayId, VertexAttribute,
};
use crate::{color::Color, shader::Error};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CompileShader(ShaderStage),
    LinkProgram {
        vertex: u32,
        fragment: u32,
    },
    DeleteShader(u32),
    DeleteProgram(u32),
    UniformLocation(String),
    CreateMesh {
        vertices: Vec<f32>,
        stride: usize,
        attributes: Vec<VertexAttribute>,
    },
    DeleteMesh {
        vertex_array: u32,
        vertex_buffer: u32,
    },
    CreateBuffer(u32),
    UploadStorage {
        buffer: u32,
        binding: u32,
        bytes: Vec<u8>,
    },
    DeleteBuffer(u32),
    Clear(Color),
    SetViewport(u32, u32),
    UseProgram(u32),
    SetUniform(i32, Uniform),
    DrawTriangleStrip {
        vertex_array: u32,
        count: i32,
    },
}

/// Shared call log, still readable after the recorder is dropped.
pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Default)]
pub struct Recorder {
    pub log: CallLog,
    pub fail_compile: Option<ShaderStage>,
    pub fail_link: bool,
    pub fail_mesh: bool,
    pub fail_buffer: bool,
    next_id: u32,
    uniforms: HashMap<String, i32>,
}

impl Recorder {
    pub fn new() -> (Self, CallLog) {
        let recorder = Self::default();
        let log = recorder.log.clone();
        (recorder, log)
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Backend for Recorder {
    fn compile_shader(&mut self, stage: ShaderStage, _source: &str) -> Result<ShaderId, Error> {
        self.push(Call::CompileShader(stage));
        if self.fail_compile == Some(stage) {
            return Err(Error::Compile {
                stage,
                log: "0:1(1): error: syntax error".to_owned(),
            });
        }
        Ok(ShaderId::new(self.next()).unwrap())
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, Error> {
        self.push(Call::LinkProgram {
            vertex: vertex.get(),
            fragment: fragment.get(),
        });
        if self.fail_link {
            return Err(Error::Link("error: unresolved symbol".to_owned()));
        }
        Ok(ProgramId::new(self.next()).unwrap())
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.push(Call::DeleteShader(shader.get()));
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.push(Call::DeleteProgram(program.get()));
    }

    fn uniform_location(&mut self, _program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.push(Call::UniformLocation(name.to_owned()));
        let next = self.uniforms.len() as i32;
        let location = *self.uniforms.entry(name.to_owned()).or_insert(next);
        Some(UniformLocation(location))
    }

    fn create_mesh(
        &mut self,
        vertices: &[f32],
        stride: usize,
        attributes: &[VertexAttribute],
    ) -> Option<Mesh> {
        self.push(Call::CreateMesh {
            vertices: vertices.to_vec(),
            stride,
            attributes: attributes.to_vec(),
        });
        if self.fail_mesh {
            return None;
        }
        Some(Mesh {
            vertex_array: VertexArrayId::new(self.next()).unwrap(),
            vertex_buffer: BufferId::new(self.next()).unwrap(),
        })
    }

    fn delete_mesh(&mut self, mesh: Mesh) {
        self.push(Call::DeleteMesh {
            vertex_array: mesh.vertex_array.get(),
            vertex_buffer: mesh.vertex_buffer.get(),
        });
    }

    fn create_buffer(&mut self) -> Option<BufferId> {
        // Zero stands for a failed allocation, as in GL.
        let id = if self.fail_buffer { 0 } else { self.next() };
        self.push(Call::CreateBuffer(id));
        BufferId::new(id)
    }

    fn upload_storage(&mut self, buffer: BufferId, binding: u32, bytes: &[u8]) {
        self.push(Call::UploadStorage {
            buffer: buffer.get(),
            binding,
            bytes: bytes.to_vec(),
        });
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.push(Call::DeleteBuffer(buffer.get()));
    }

    fn clear(&mut self, colour: Color) {
        self.push(Call::Clear(colour));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.push(Call::SetViewport(width, height));
    }

    fn use_program(&mut self, program: ProgramId) {
        self.push(Call::UseProgram(program.get()));
    }

    fn set_uniform(&mut self, UniformLocation(location): UniformLocation, value: Uniform) {
        self.push(Call::SetUniform(location, value));
    }

    fn draw_triangle_strip(&mut self, mesh: &Mesh, count: i32) {
        self.push(Call::DrawTriangleStrip {
            vertex_array: mesh.vertex_array.get(),
            count,
        });
    }
}
