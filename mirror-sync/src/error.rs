//! Error types for mirror-sync.

use mirror_store::StoreError;
use mirror_types::TypesError;
use thiserror::Error;

use crate::fingerprint::FingerprintError;

/// Fatal errors that stop a mirror run.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Source or destination bucket is unusable. Raised before any work.
    #[error("configuration error: {source}")]
    Configuration {
        /// Bucket that failed the access check.
        bucket: String,
        /// Store error from the access check.
        source: StoreError,
    },

    /// The fingerprint procedure failed.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A document could not be encoded.
    #[error("document error: {0}")]
    Document(#[from] TypesError),
}

impl MirrorError {
    /// Check if this error was raised by the startup access check.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MirrorError::Configuration { .. })
    }
}
