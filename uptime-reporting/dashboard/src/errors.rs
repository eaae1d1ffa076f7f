//! Error types for the dashboard

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with something other than 200
    #[error("{endpoint} returned status {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// Payload was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
