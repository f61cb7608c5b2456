//! Shared types for Squonk Radio
//!
//! This crate holds the vocabulary used by the store and the bot: the two
//! key spaces of the registry file, song records and playlists, the
//! commands and callback data the bot understands, and the reply texts it
//! sends back to users.

pub mod callbacks;
pub mod commands;
pub mod keys;
pub mod replies;
pub mod songs;

// Re-export commonly used types
pub use callbacks::CallbackAction;
pub use commands::{parse_group_registration, Command};
pub use keys::{GroupId, UserKey};
pub use songs::{Playlist, RegistryEntry, SongRecord, UNKNOWN};
