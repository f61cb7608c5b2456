//! In-memory form of the registry file

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use squonk_types::{GroupId, Playlist, RegistryEntry, SongRecord, UserKey};

use crate::error::{Result, StoreError};

/// Whole registry document
///
/// Registrations and song lists share one key space. Nothing stops a user
/// id from colliding with a group id; the accessors below only look at
/// entries of the kind they expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Group the user last registered, if any
    pub fn group_for(&self, user: &UserKey) -> Option<GroupId> {
        match self.entries.get(user.as_str()) {
            Some(RegistryEntry::Group(group)) => Some(group.clone()),
            _ => None,
        }
    }

    /// Point `user` at `group`. Last write wins, whatever the key held.
    pub fn register(&mut self, user: &UserKey, group: GroupId) {
        self.entries
            .insert(user.as_str().to_string(), RegistryEntry::Group(group));
    }

    /// Songs stored for `group`, in upload order.
    ///
    /// A missing key, or a key holding a registration, reads as empty.
    pub fn songs(&self, group: &GroupId) -> Playlist {
        match self.entries.get(group.as_str()) {
            Some(RegistryEntry::Songs(songs)) => Playlist::new(songs.clone()),
            _ => Playlist::default(),
        }
    }

    /// Append `song` to the group's list and return the new length.
    pub fn append_song(&mut self, group: &GroupId, song: SongRecord) -> Result<usize> {
        let entry = self
            .entries
            .entry(group.as_str().to_string())
            .or_insert_with(|| RegistryEntry::Songs(Vec::new()));

        match entry {
            RegistryEntry::Songs(songs) => {
                songs.push(song);
                Ok(songs.len())
            }
            RegistryEntry::Group(_) => Err(StoreError::KeyConflict(group.clone())),
        }
    }
}
