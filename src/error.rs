//! Error types for configuration and application startup.

use std::path::PathBuf;

/// Errors that can occur while loading or saving `config.json`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}: {source}")]
    Deserialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(serde_json::Error),
}

/// Top-level error returned from `main`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Terminal setup, drawing and event polling all surface as I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw mode or alternate screen could not be set up.
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Logger error: {0}")]
    Logger(String),
}

pub type AppResult<T> = Result<T, AppError>;
