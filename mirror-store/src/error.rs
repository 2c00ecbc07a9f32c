//! Error types for mirror-store.

use thiserror::Error;

/// Errors that can occur during object store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Object does not exist.
    ///
    /// The one recoverable condition: an existence check treats it as
    /// "not there yet".
    #[error("object not found: {bucket}/{key}")]
    NotFound {
        /// Bucket that was searched.
        bucket: String,
        /// Missing key.
        key: String,
    },

    /// Bucket does not exist or cannot be accessed.
    #[error("cannot access bucket {bucket}: {reason}")]
    BucketInaccessible {
        /// Bucket name.
        bucket: String,
        /// Why access failed.
        reason: String,
    },

    /// Key is not usable by this backend (e.g. escapes the bucket).
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Object metadata could not be read or written.
    #[error("metadata error for {key}: {source}")]
    Metadata {
        /// Key whose metadata failed.
        key: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure.
    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Check if this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = StoreError::NotFound {
            bucket: "mirror".into(),
            key: "index.json".into(),
        };
        assert_eq!(err.to_string(), "object not found: mirror/index.json");
        assert!(err.is_not_found());
    }

    #[test]
    fn io_is_not_not_found() {
        let err = StoreError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
