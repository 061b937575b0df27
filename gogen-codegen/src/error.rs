//! Error types for code generation.

use gogen_schema::SchemaError;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema inspection or assembly error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Artifact kind missing from the configured registry.
    #[error("no registered artifact kind '{kind}'")]
    UnknownKind {
        /// Requested kind.
        kind: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
