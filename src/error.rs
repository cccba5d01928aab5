//! Domain-specific error types for atlas-explorer

use thiserror::Error;

/// Main error type for the atlas explorer
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Dataset error: {message}")]
    Dataset { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("State error: {message}")]
    State { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        AtlasError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AtlasError {
    fn from(err: std::io::Error) -> Self {
        AtlasError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AtlasError {
    fn from(err: anyhow::Error) -> Self {
        AtlasError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for AtlasError {
    fn from(err: chrono::ParseError) -> Self {
        AtlasError::Validation {
            message: format!("Date parsing error: {}", err),
        }
    }
}

/// Result type alias for atlas-explorer operations
pub type Result<T> = std::result::Result<T, AtlasError>;
