//! Error types for the widget crate.

use thiserror::Error;

/// Errors raised while loading a table configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table needs at least one column.
    #[error("table configuration has no columns")]
    NoColumns,

    /// Two columns resolve to the same identifier.
    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// A column has neither a key nor a header.
    #[error("column {index} has neither a key nor a header")]
    UnnamedColumn {
        /// Position of the offending column
        index: usize,
    },
}

/// Error returned when text cannot be read as a date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{input}' as a date")]
pub struct DateParseError {
    /// The rejected input
    pub input: String,
}
