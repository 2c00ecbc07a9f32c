//! # mirror-core
//!
//! Pure logic for provider-mirror (no I/O, instant tests).
//!
//! This crate holds the parts of mirroring that are a function of their
//! inputs alone:
//! - [`parse_identifier`] turns archive names into [`ArtifactIdentifier`]s
//! - [`ArtifactCatalog`] groups them by package, then version
//! - [`MirrorLayout`] decides where archives land and what URL documents use
//! - [`VersionDocumentBuilder`] / [`IndexDocumentBuilder`] assemble the documents
//!
//! The actual I/O (object store, fingerprint procedure) is performed by
//! `mirror-sync`, which feeds these pieces.
//!
//! [`ArtifactIdentifier`]: mirror_types::ArtifactIdentifier

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod catalog;
pub mod identifier;
pub mod layout;

pub use builder::{IndexDocumentBuilder, VersionDocumentBuilder};
pub use catalog::{resolve_platforms, ArtifactCatalog, VersionGroups};
pub use identifier::{parse_file_name, parse_identifier, NameParts};
pub use layout::{index_document_key, version_document_key, LayoutError, MirrorLayout};
