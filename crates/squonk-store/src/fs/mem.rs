#[cfg(any(test, feature = "test-support"))]
use std::collections::{HashMap, HashSet};
#[cfg(any(test, feature = "test-support"))]
use std::io;
#[cfg(any(test, feature = "test-support"))]
use std::path::{Path, PathBuf};
#[cfg(any(test, feature = "test-support"))]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
#[cfg(any(test, feature = "test-support"))]
use std::sync::Mutex;

#[cfg(any(test, feature = "test-support"))]
use super::{CreateDirAll, ExistsFile, ReadFile, WriteFile};

/// In-memory filesystem for store tests.
///
/// `Send + Sync` so it can back a store shared across tokio tasks.
/// Paths are raw [`PathBuf`] keys with no normalization: `"a.json"` and
/// `"./a.json"` are distinct entries.
#[cfg(any(test, feature = "test-support"))]
#[derive(Default)]
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
    dirs: Mutex<HashSet<PathBuf>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

#[cfg(any(test, feature = "test-support"))]
impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn dir_exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    /// Number of successful `write` calls so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following `write` fail with `PermissionDenied`
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ReadFile for MemFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
    }
}

#[cfg(any(test, feature = "test-support"))]
impl WriteFile for MemFs {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled",
            ));
        }
        self.insert(path, contents);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ExistsFile for MemFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CreateDirAll for MemFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let files = self.files.lock().unwrap();
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if files.contains_key(ancestor) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("path component is a file: {}", ancestor.display()),
                ));
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}
