//! Key layout of the mirror.
//!
//! ```text
//! {prefix}index.json
//! {prefix}{version}.json
//! {prefix}{file_name}              (flat)
//! {prefix}{version}/{file_name}    (per-version)
//! ```
//!
//! Keys depend only on the prefix, version and file name. The fingerprint
//! never appears in a key.

use std::fmt;
use std::str::FromStr;

use mirror_types::{ArtifactIdentifier, ObjectLocation, INDEX_DOCUMENT_NAME};
use serde::Deserialize;
use thiserror::Error;

/// Where archives are placed relative to the version documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MirrorLayout {
    /// Archives sit next to the documents; URLs are bare file names.
    Flat,
    /// Archives sit in a `{version}/` subdirectory; URLs are `{version}/{file_name}`.
    PerVersion,
}

impl MirrorLayout {
    /// Archive path relative to the mirror prefix. Also the URL written
    /// into the version document.
    pub fn artifact_path(&self, artifact: &ArtifactIdentifier) -> String {
        match self {
            MirrorLayout::Flat => artifact.file_name.clone(),
            MirrorLayout::PerVersion => format!("{}/{}", artifact.version, artifact.file_name),
        }
    }

    /// Whether the archive path is a plain relative path. A `.` or `..`
    /// version would turn the per-version directory into a path step.
    pub fn is_addressable(&self, artifact: &ArtifactIdentifier) -> bool {
        match self {
            MirrorLayout::Flat => true,
            MirrorLayout::PerVersion => artifact.version != "." && artifact.version != "..",
        }
    }

    /// Full destination key for an archive.
    pub fn artifact_key(&self, destination: &ObjectLocation, artifact: &ArtifactIdentifier) -> String {
        destination.key(&self.artifact_path(artifact))
    }
}

impl fmt::Display for MirrorLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorLayout::Flat => write!(f, "flat"),
            MirrorLayout::PerVersion => write!(f, "per-version"),
        }
    }
}

/// Unknown layout name.
#[derive(Debug, Error)]
#[error("unknown layout '{0}' (expected 'flat' or 'per-version')")]
pub struct LayoutError(pub String);

impl FromStr for MirrorLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(MirrorLayout::Flat),
            "per-version" => Ok(MirrorLayout::PerVersion),
            other => Err(LayoutError(other.to_string())),
        }
    }
}

/// Key of the version document for `version`.
pub fn version_document_key(destination: &ObjectLocation, version: &str) -> String {
    destination.key(&format!("{}.json", version))
}

/// Key of the index document.
pub fn index_document_key(destination: &ObjectLocation) -> String {
    destination.key(INDEX_DOCUMENT_NAME)
}
