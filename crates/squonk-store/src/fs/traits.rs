use std::io;
use std::path::Path;

pub trait ReadFile {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Replaces the whole content of `path`, creating the file if needed.
pub trait WriteFile {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

pub trait ExistsFile {
    fn exists(&self, path: &Path) -> bool;
}

pub trait CreateDirAll {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Everything the registry store needs from a filesystem.
///
/// Implemented for any type providing the individual capabilities, so
/// callers only name this bound.
pub trait StoreFs: ReadFile + WriteFile + ExistsFile + CreateDirAll + Send + Sync + 'static {}

impl<T> StoreFs for T where T: ReadFile + WriteFile + ExistsFile + CreateDirAll + Send + Sync + 'static {}
