//! # mirror-types
//!
//! Data types for the provider network mirror.
//!
//! This crate provides the foundational types used across all provider-mirror crates:
//! - [`ArtifactIdentifier`], [`ArtifactSource`] - Parsed release archives and where they live
//! - [`ObjectLocation`] - A `bucket/prefix` pair in the object store
//! - [`VersionDocument`], [`IndexDocument`] - Network mirror protocol documents
//! - [`TypesError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod artifact;
mod documents;
mod error;
mod location;

pub use artifact::{ArtifactIdentifier, ArtifactSource};
pub use documents::{ArchiveEntry, IndexDocument, VersionDocument, VersionEntry};
pub use error::TypesError;
pub use location::ObjectLocation;

/// Custom object metadata key holding an artifact's fingerprint.
///
/// Lets a rerun skip the copy when the mirror object is already current.
pub const FINGERPRINT_METADATA_KEY: &str = "dirhash";

/// File extension of release archives. Anything else is ignored.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Content type for archive objects written to the mirror.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Content type for version and index documents.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Key (relative to the mirror prefix) of the index document.
pub const INDEX_DOCUMENT_NAME: &str = "index.json";
