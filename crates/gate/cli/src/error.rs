//! CLI error types

use legend_gate::GateError;
use legend_gate_store::StorageError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input the gate would not accept
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Gate error
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
