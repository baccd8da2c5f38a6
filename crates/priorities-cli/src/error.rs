use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] priorities_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("User identifier cannot be empty")]
    EmptyUserId,
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("{0} is not in your priorities")]
    NotAPriority(String),
    #[error("Content width must be positive, got {0}")]
    InvalidWidth(f32),
    #[error("Config file already exists at {0}; pass --force to overwrite")]
    ConfigExists(String),
    #[error("Failed to resolve the data directory; pass --db-path or --config")]
    NoDataDir,
}
