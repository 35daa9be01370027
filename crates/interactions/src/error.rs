//! Error types for the interactions crate.

use thiserror::Error;

/// Errors raised by the durable store, the interaction store and the session
#[derive(Error, Debug)]
pub enum StoreError {
    /// The durable store could not be read or written
    #[error("Persistence error for key '{key}': {source}")]
    Persistence {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded to, or decoded from, JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The write would exceed the store's quota
    #[error("Storage capacity exceeded writing '{key}': {required} bytes needed, limit is {limit}")]
    Capacity {
        key: String,
        required: usize,
        limit: usize,
    },

    /// A mutation was attempted with nobody logged in. The mutation is discarded.
    #[error("Authentication required")]
    AuthRequired,

    /// The logged-in user is not an administrator
    #[error("Administrator access required")]
    AdminRequired,

    /// Ratings live on the 1-10 scale
    #[error("Invalid rating {0}: expected a value from 1 to 10")]
    InvalidRating(u8),

    /// Rejected user input (login form fields, store keys)
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl StoreError {
    pub(crate) fn validation(field: &str, reason: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
