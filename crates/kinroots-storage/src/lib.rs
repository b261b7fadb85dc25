//! KinRoots Storage - Lineage persistence backends
//!
//! One capability trait, several interchangeable backends: the hosting
//! application picks exactly one at composition time.

pub mod error;
pub mod traits;

#[cfg(feature = "redb")]
pub mod redb;

#[cfg(feature = "remote")]
pub mod http;

pub mod memory;

pub use error::{StorageError, StorageResult};
pub use traits::LineageStore;

#[cfg(feature = "redb")]
pub use redb::RedbStore;

#[cfg(feature = "remote")]
pub use http::HttpStore;

pub use memory::MemoryStore;
