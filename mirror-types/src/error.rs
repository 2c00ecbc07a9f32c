//! Error types for mirror-types.

use thiserror::Error;

/// Errors produced while building or encoding mirror types.
#[derive(Debug, Error)]
pub enum TypesError {
    /// A `bucket/prefix` location string could not be parsed.
    #[error("invalid location '{0}': bucket name is empty")]
    InvalidLocation(String),

    /// JSON encoding of a mirror document failed.
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TypesError::InvalidLocation("/prefix".into());
        assert_eq!(
            err.to_string(),
            "invalid location '/prefix': bucket name is empty"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypesError>();
    }
}
