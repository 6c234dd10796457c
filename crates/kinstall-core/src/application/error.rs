//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not layout rules.
//! Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while building the installer layers.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Directory traversal failed (unreadable directory, permission denied).
    #[error("Cannot walk {path}: {reason}")]
    Walk { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A move would overwrite an existing file or folder.
    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// A folder the layout requires is not there.
    #[error("Required folder is missing: {path}")]
    MissingFolder { path: PathBuf },

    /// Filesystem adapter state is unusable (lock poisoned, etc.).
    #[error("Filesystem adapter lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Walk { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the directory is readable by the current user".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::DestinationExists { path } => vec![
                format!("Already present: {}", path.display()),
                "The installer folder holds a previous build; remove it and re-run".into(),
                "Generated manifest names must be unique per namespace".into(),
            ],
            Self::MissingFolder { path } => vec![
                format!("Expected folder: {}", path.display()),
                "Run the manifest generation and staging steps before building".into(),
            ],
            Self::LockPoisoned => vec!["This is likely a bug; re-run the build".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Walk { .. } | Self::Filesystem { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
            Self::DestinationExists { .. } => ErrorCategory::Validation,
            Self::MissingFolder { .. } => ErrorCategory::NotFound,
        }
    }
}
