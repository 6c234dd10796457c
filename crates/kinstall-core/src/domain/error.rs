// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be wrapped with phase context)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid namespace '{name}': {reason}")]
    InvalidNamespace { name: String, reason: String },

    #[error("Namespace '{name}' is declared more than once")]
    DuplicateNamespace { name: String },

    // ========================================================================
    // Manifest Errors
    // ========================================================================
    #[error("File name is not valid UTF-8: {path}")]
    NonUtf8FileName { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidNamespace { name, reason } => vec![
                format!("Namespace '{}' was rejected: {}", name, reason),
                "Namespace names become folder names; use lowercase letters, digits and '-'"
                    .into(),
            ],
            Self::DuplicateNamespace { name } => vec![
                format!("Remove the duplicate entry for '{}'", name),
                "Each namespace is processed exactly once per run".into(),
            ],
            Self::NonUtf8FileName { path } => vec![
                format!("Rename '{}' to a UTF-8 file name", path),
                "Kustomization entries must be valid YAML strings".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidNamespace { .. } | Self::DuplicateNamespace { .. } => {
                ErrorCategory::Validation
            }
            Self::NonUtf8FileName { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
