//! Throwaway shader files for tests.

use std::path::PathBuf;

use crate::config::ShaderPaths;

pub const VERTEX: &str = "#version 430 core\nvoid main() {}\n";
pub const FRAGMENT: &str = "#version 430 core\nout vec4 c;\nvoid main() { c = vec4(1.); }\n";

/// A vertex and fragment file in a directory of their own, removed on drop.
pub struct ScratchShaders {
    dir: PathBuf,
    pub paths: ShaderPaths,
}

impl ScratchShaders {
    /// `test` must be unique among tests running in the same process.
    pub fn new(test: &str, vertex: &str, fragment: &str) -> Self {
        let name = format!("sphray-{}-{test}", std::process::id());
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();

        let paths = ShaderPaths {
            vertex: dir.join("vertex.glsl"),
            fragment: dir.join("fragment.glsl"),
        };
        std::fs::write(&paths.vertex, vertex).unwrap();
        std::fs::write(&paths.fragment, fragment).unwrap();

        Self { dir, paths }
    }

    pub fn valid(test: &str) -> Self {
        Self::new(test, VERTEX, FRAGMENT)
    }
}

impl Drop for ScratchShaders {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn directory_is_removed_on_drop() {
        let shaders = ScratchShaders::valid("scratch-cleanup");
        let dir = shaders.dir.clone();
        assert!(shaders.paths.vertex.is_file());
        assert!(shaders.paths.fragment.is_file());

        drop(shaders);

        assert!(!dir.exists());
    }
}
