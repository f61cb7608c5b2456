//! Whole-file access used by [`RegistryStore`](crate::RegistryStore).
//!
//! The registry is always read and rewritten as one string, so these traits
//! only deal in whole strings plus an existence check.
//! [`SystemFs`] is what the bot runs with; `MemFs` backs the tests and is
//! exported with the `test-support` feature.

#[cfg(any(test, feature = "test-support"))]
mod mem;
mod system;
mod traits;

#[cfg(any(test, feature = "test-support"))]
pub use mem::MemFs;
pub use system::SystemFs;
pub use traits::{CreateDirAll, ExistsFile, ReadFile, StoreFs, WriteFile};
