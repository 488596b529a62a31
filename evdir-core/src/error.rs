//! Error types for evdir.

use thiserror::Error;

/// Errors that can occur in evdir operations.
#[derive(Error, Debug)]
pub enum EvdirError {
    /// Network failure, non-success status or malformed payload.
    #[error("{0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Event not found: {0}")]
    EventNotFound(u64),

    #[error("Events are not loaded yet")]
    NotLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for evdir operations.
pub type EvdirResult<T> = Result<T, EvdirError>;
