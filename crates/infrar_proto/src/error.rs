//! Error types for the wire protocol.

use thiserror::Error;

/// Result type alias for protocol operations.
pub type ProtoResult<T> = Result<T, ProtoError>;

/// Errors that can occur while crossing the serialization boundary.
#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("failed to decode JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),
}
