//! Error types for the uptime collector

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectorError>;

#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}
