//! Error types for the recurrence_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for recurrence_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rule field is out of range for its kind
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// A date string could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The rule kind is not one we know how to generate
    #[error("Unknown recurrence kind: {0}")]
    UnknownKind(String),

    /// Event template validation error
    #[error("Event template error: {0}")]
    Template(String),
}
