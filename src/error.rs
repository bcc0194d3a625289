//! Error types for the sizing calculator

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, validating, or sizing a configuration
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input document not found
    #[error("cannot find input document: {path}")]
    InputNotFound { path: String },

    /// Input document could not be parsed as YAML
    #[error("failed to parse input document: {0}")]
    InputParse(#[from] serde_yaml::Error),

    /// Input document is not a key/value mapping
    #[error("input document must be a mapping of sizing fields, got {kind}")]
    InputNotMapping { kind: &'static str },

    /// Strict-mode validation failure
    #[error("input validation failed with {problems} problem(s)")]
    Validation { problems: usize },

    /// Report serialization failed
    #[error("failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}
