//! Error types for pswp

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PswpError {
    /// Source directory is missing; callers surface this as a notice
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Session file could not be used; treated as an absent session
    #[error("Session file is corrupt: {0}")]
    SessionCorrupt(String),

    /// A decided item has no matching file on disk
    #[error("No source file found for '{0}'")]
    UnresolvedSource(String),

    /// Execution was requested without operator confirmation
    #[error("Transfer not confirmed")]
    NotConfirmed,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PswpError>;
