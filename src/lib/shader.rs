//! Loading a GPU program from the two GLSL source files on disk.

#[cfg(test)]
pub(crate) mod scratch;

use std::path::{Path, PathBuf};

use log::debug;

use crate::{
    backend::{Backend, ProgramId, ShaderStage},
    config::ShaderPaths,
};

#[derive(Debug, thiserror::Error)]
/// Possible errors while turning source files into a linked program.
pub enum Error {
    #[error("Could not read {stage} shader `{}`", .path.display())]
    /// Source file is missing or unreadable.
    Io {
        #[allow(missing_docs)]
        stage: ShaderStage,
        #[allow(missing_docs)]
        path: PathBuf,
        #[allow(missing_docs)]
        source: std::io::Error,
    },

    #[error("{stage} shader `{}` is empty", .path.display())]
    /// Source file holds nothing to compile.
    Empty {
        #[allow(missing_docs)]
        stage: ShaderStage,
        #[allow(missing_docs)]
        path: PathBuf,
    },

    #[error("{0} shader source contains a NUL byte")]
    /// Source cannot be passed to the driver as a C string.
    InvalidSource(ShaderStage),

    #[error("Failed to compile {stage} shader:\n{log}")]
    /// Driver rejected a stage, `log` is its info log.
    Compile {
        #[allow(missing_docs)]
        stage: ShaderStage,
        #[allow(missing_docs)]
        log: String,
    },

    #[error("Failed to link program:\n{0}")]
    /// Stages compiled but do not link together.
    Link(String),
}

/// Read a stage's source text. Empty files count as failures.
pub fn read_source(stage: ShaderStage, path: &Path) -> Result<String, Error> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        stage,
        path: path.to_owned(),
        source,
    })?;

    if source.trim().is_empty() {
        return Err(Error::Empty {
            stage,
            path: path.to_owned(),
        });
    }

    Ok(source)
}

/// Read, compile and link the vertex and fragment stages at `paths`.
///
/// Intermediate shader objects are always released, whether linking succeeds or not.
pub fn load_program<B: Backend>(backend: &mut B, paths: &ShaderPaths) -> Result<ProgramId, Error> {
    let vertex_source = read_source(ShaderStage::Vertex, &paths.vertex)?;
    let fragment_source = read_source(ShaderStage::Fragment, &paths.fragment)?;

    let vertex = backend.compile_shader(ShaderStage::Vertex, &vertex_source)?;
    let fragment = match backend.compile_shader(ShaderStage::Fragment, &fragment_source) {
        Ok(fragment) => fragment,
        Err(error) => {
            backend.delete_shader(vertex);
            return Err(error);
        }
    };

    let program = backend.link_program(vertex, fragment);

    backend.delete_shader(vertex);
    backend.delete_shader(fragment);

    if let Ok(program) = program {
        debug!(
            "Linked program {} from `{}` and `{}`",
            program.get(),
            paths.vertex.display(),
            paths.fragment.display()
        );
    }

    program
}
