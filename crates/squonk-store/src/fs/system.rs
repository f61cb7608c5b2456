use std::path::Path;

use super::{CreateDirAll, ExistsFile, ReadFile, WriteFile};

/// The real disk. Registry files are small, so every call is a plain
/// blocking `std::fs` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFs;

impl ReadFile for SystemFs {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl WriteFile for SystemFs {
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }
}

impl ExistsFile for SystemFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl CreateDirAll for SystemFs {
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
