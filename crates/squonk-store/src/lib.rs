//! Registry store for Squonk Radio
//!
//! One JSON object on disk holds both key spaces of the bot: user ids map
//! to the group they upload for, group ids map to their ordered song list.
//! Every operation loads the whole file and every mutation rewrites it.

pub mod error;
pub mod fs;
pub mod registry;
pub mod store;

pub use error::{Result, StoreError};
pub use registry::Registry;
pub use store::RegistryStore;
