//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading and validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A catalog file isn't valid JSON for the expected shape
    ///
    /// `line` and `column` come from serde_json and point at the offending token
    #[error("Parse error at line {line}, column {column} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        column: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two entities of the same kind share an id
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: String, id: u32 },

    /// Referenced entity doesn't exist (e.g., screening for a non-existent cinema)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// Catalog-wide validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CatalogError {
    pub(crate) fn invalid(field: &str, value: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
