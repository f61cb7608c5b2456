//! File-backed registry store

use std::path::{Path, PathBuf};
use std::sync::Arc;

use squonk_types::{GroupId, Playlist, SongRecord, UserKey};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::fs::{StoreFs, SystemFs};
use crate::registry::Registry;

/// Registry persisted as a single JSON file.
///
/// Every call loads the whole file; every mutation rewrites it. Calls on
/// clones of the same store are serialized by a shared async mutex, so a
/// read-modify-write never interleaves with another one from this process.
/// Nothing coordinates with other processes writing the same file.
pub struct RegistryStore<F = SystemFs> {
    fs: Arc<F>,
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl<F> Clone for RegistryStore<F> {
    fn clone(&self) -> Self {
        Self {
            fs: Arc::clone(&self.fs),
            path: Arc::clone(&self.path),
            lock: Arc::clone(&self.lock),
        }
    }
}

impl RegistryStore<SystemFs> {
    /// Store backed by the real filesystem
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(SystemFs, path)
    }
}

impl<F: StoreFs> RegistryStore<F> {
    pub fn with_fs(fs: F, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Registry store at {}", path.display());
        Self {
            fs: Arc::new(fs),
            path: Arc::new(path),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn fs(&self) -> &F {
        &self.fs
    }

    /// Read the whole registry. A missing or blank file is an empty registry.
    pub async fn load(&self) -> Result<Registry> {
        let _guard = self.lock.lock().await;
        self.read()
    }

    /// Overwrite the file with `registry`
    pub async fn save(&self, registry: &Registry) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(registry)
    }

    /// Load, apply `mutate`, and write the result back.
    ///
    /// Nothing is written when `mutate` fails.
    pub async fn update<T>(
        &self,
        mutate: impl FnOnce(&mut Registry) -> Result<T>,
    ) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut registry = self.read()?;
        let out = mutate(&mut registry)?;
        self.write(&registry)?;
        Ok(out)
    }

    /// Record that `user` uploads for `group`
    pub async fn register(&self, user: &UserKey, group: GroupId) -> Result<()> {
        debug!("Registering user {} for group {}", user, group);
        self.update(|registry| {
            registry.register(user, group);
            Ok(())
        })
        .await
    }

    pub async fn group_for(&self, user: &UserKey) -> Result<Option<GroupId>> {
        Ok(self.load().await?.group_for(user))
    }

    /// Append `song` to the group's playlist and return the new length
    pub async fn append_song(&self, group: &GroupId, song: SongRecord) -> Result<usize> {
        debug!("Appending {} to group {}", song.file_id, group);
        self.update(|registry| registry.append_song(group, song)).await
    }

    pub async fn playlist(&self, group: &GroupId) -> Result<Playlist> {
        Ok(self.load().await?.songs(group))
    }

    fn read(&self) -> Result<Registry> {
        if !self.fs.exists(&self.path) {
            debug!("Registry file {} not found, starting empty", self.path.display());
            return Ok(Registry::new());
        }

        let raw = self.fs.read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.to_path_buf(),
            source,
        })?;

        if raw.trim().is_empty() {
            return Ok(Registry::new());
        }

        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.to_path_buf(),
            source,
        })
    }

    fn write(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // serde_json's pretty printer indents with two spaces
        let raw = serde_json::to_string_pretty(registry)?;
        self.fs.write(&self.path, &raw).map_err(|source| StoreError::Io {
            path: self.path.to_path_buf(),
            source,
        })?;

        debug!("Saved registry with {} keys to {}", registry.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
