//! Error types for tile-batch

use thiserror::Error;

/// Result type alias for tile-batch
pub type Result<T> = std::result::Result<T, TileBatchError>;

/// Main error type for tile-batch
#[derive(Error, Debug)]
pub enum TileBatchError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Archive serialization errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
