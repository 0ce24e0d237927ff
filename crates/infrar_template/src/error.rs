//! Error types for template rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while loading or rendering a template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unterminated directive at offset {0}")]
    Unterminated(usize),

    #[error("invalid variable path: {0:?}")]
    BadPath(String),

    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("malformed filter argument: {0}")]
    BadFilterArg(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),
}
