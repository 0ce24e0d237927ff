//! Error types for the engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Fatal local failures a plugin tier can hit.
///
/// Child invocation failures are deliberately not represented here; they
/// degrade into warnings during aggregation (see [`crate::invoker::InvokeError`]).
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("template error: {0}")]
    Template(#[from] infrar_template::TemplateError),

    #[error("protocol error: {0}")]
    Proto(#[from] infrar_proto::ProtoError),

    #[error("invalid plugin configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
