//! Error types for the ETL workspace

use thiserror::Error;

/// Result type alias for ETL operations
pub type Result<T> = std::result::Result<T, EpoError>;

/// Main error type for the ETL workspace
#[derive(Error, Debug)]
pub enum EpoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(String),

    #[error("Decode error in {file}: {reason}")]
    Decode { file: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
