use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadLog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteLog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to lock {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Timed out waiting for lock {}", path.display())]
    LockTimeout { path: PathBuf },

    #[error("Invalid session counter \"{value}\"")]
    InvalidCounter { value: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git not found")]
    NotFound,

    #[error("Failed to run git: {0}")]
    Spawn(std::io::Error),

    #[error("Invalid UTF-8 from git: {0}")]
    Utf8(std::string::FromUtf8Error),

    #[error("git error: {0}")]
    Failed(String),
}
