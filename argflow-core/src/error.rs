//! Error types for argument processing.

use thiserror::Error;

/// Main error type for schema construction and argument processing.
#[derive(Error, Debug)]
pub enum ArgsError {
    /// Two positional array parameters would compete for the same leftover tokens
    #[error("Schema cannot have more than one positional array: {first} and {second}")]
    MultipleVariadicPositionals { first: String, second: String },

    /// Two parameters share the same name
    #[error("Duplicate parameter name: {0}")]
    DuplicateParam(String),

    /// A required parameter was absent (or an empty array) after processing
    #[error("{name} is required")]
    MissingRequired { name: String },

    /// A path parameter held something other than a string
    #[error("Invalid path value for {name}: expected string, got {found}")]
    InvalidPathSegment { name: String, found: &'static str },

    /// A schema document could not be parsed
    #[error("Invalid schema: {0}")]
    SchemaFormat(String),

    /// A schema file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for argument processing operations
pub type Result<T> = std::result::Result<T, ArgsError>;

impl From<serde_json::Error> for ArgsError {
    fn from(err: serde_json::Error) -> Self {
        ArgsError::SchemaFormat(err.to_string())
    }
}

impl From<toml::de::Error> for ArgsError {
    fn from(err: toml::de::Error) -> Self {
        ArgsError::SchemaFormat(err.to_string())
    }
}
