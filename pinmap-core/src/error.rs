//! Error types for pinmap

use thiserror::Error;

/// Main error type for pinmap operations
#[derive(Error, Debug)]
pub enum Error {
    /// A scene node, overlay element or panel entry referenced by id does not exist.
    /// This is a content/configuration error and is never retried.
    #[error("[{context}] Couldn't find element with id '{id}'")]
    MissingElement { id: String, context: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::MissingElement`]
    pub fn missing(context: impl Into<String>, id: impl Into<String>) -> Self {
        Error::MissingElement {
            id: id.into(),
            context: context.into(),
        }
    }
}

/// Result type alias for pinmap operations
pub type Result<T> = std::result::Result<T, Error>;
