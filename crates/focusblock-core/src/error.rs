//! Error types for focusblock-core.
//!
//! The session engine itself has no failure modes -- malformed input is
//! normalized away and invalid transitions are no-ops. Errors exist only at
//! the storage edge (configuration and session snapshots on disk).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Session snapshot persistence errors.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to write session snapshot to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Failed to remove session snapshot at {path}: {message}")]
    ClearFailed { path: PathBuf, message: String },
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
