//! Storage error types.

use crate::value::Kind;

/// Errors from storage operations.
///
/// Only engine and configuration failures are expected to reach callers of
/// the public [`Storage`](crate::Storage) surface; codec and serialization
/// failures are absorbed there and degrade to the caller's default. The
/// `try_*` operations expose all of them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The engine failed to open a namespace or execute a key operation.
    #[error("engine error: {0}")]
    Engine(String),

    /// A stored entry carries a different kind than the one requested.
    #[error("kind mismatch: stored {stored}, requested {requested}")]
    KindMismatch {
        /// The kind recorded in the entry's tag.
        stored: Kind,
        /// The kind the caller asked to decode.
        requested: Kind,
    },

    /// A stored entry's payload could not be decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// Structured-object serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage configuration is invalid or incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Engine("namespace locked".to_string());
        assert_eq!(err.to_string(), "engine error: namespace locked");

        let err = StoreError::KindMismatch {
            stored: Kind::Int64,
            requested: Kind::Int32,
        };
        assert_eq!(err.to_string(), "kind mismatch: stored int64, requested int32");
    }

    #[test]
    fn test_serialization_conversion() {
        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err = StoreError::from(json_err);
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
