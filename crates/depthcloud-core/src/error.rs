//! Error types for depthcloud-rs.

use thiserror::Error;

/// The main error type for depthcloud-rs operations.
#[derive(Error, Debug)]
pub enum DepthCloudError {
    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A configuration value is out of its valid range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for depthcloud-rs operations.
pub type Result<T> = std::result::Result<T, DepthCloudError>;
