//! # mirror-store
//!
//! Object store abstraction for provider-mirror.
//!
//! The mirror only needs a handful of operations from its store: bucket and
//! object heads, put/upload/copy with custom metadata, prefix listing and a
//! scoped download. [`ObjectStore`] captures exactly those, so the sync
//! logic never depends on a particular backend.
//!
//! ## Backends
//!
//! - [`MemoryStore`] - in-memory, records every write; used by tests
//! - [`FsStore`] - a directory per bucket under a root; the result can be
//!   served as-is by any static file server
//!
//! ## Example
//!
//! ```rust,ignore
//! use mirror_store::{MemoryStore, Metadata, ObjectStore};
//!
//! # async fn example() -> Result<(), mirror_store::StoreError> {
//! let store = MemoryStore::new().with_bucket("mirror");
//! store
//!     .put_object("mirror", "index.json", b"{}".to_vec(), "application/json", Metadata::new())
//!     .await?;
//! assert!(store.exists("mirror", "index.json").await?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod fs;
mod memory;
mod store;

pub use error::StoreError;
pub use fs::FsStore;
pub use memory::{MemoryStore, StoredObject, WriteOp};
pub use store::{Metadata, MetadataDirective, ObjectHead, ObjectStore};

pub use tempfile::TempPath;
