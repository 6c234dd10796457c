//! Unified error handling for Kinstall Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with namespace/phase context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, Namespace, Phase};

/// Root error type for Kinstall Core operations.
///
/// Every failure is fatal for the run; the caller decides how to report it.
#[derive(Debug, Error, Clone)]
pub enum InstallerError {
    /// Errors from the domain layer (layout rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A kustomization could not be serialized.
    #[error("Manifest error: {message}")]
    Manifest { message: String },

    /// A failure while processing one namespace in one phase.
    #[error("{phase} failed for namespace '{namespace}': {source}")]
    Phase {
        namespace: Namespace,
        phase: Phase,
        #[source]
        source: Box<InstallerError>,
    },
}

impl InstallerError {
    /// Attach namespace and phase context. Already-contextualised errors are
    /// returned unchanged.
    pub fn in_phase(self, namespace: &Namespace, phase: Phase) -> Self {
        match self {
            Self::Phase { .. } => self,
            other => Self::Phase {
                namespace: namespace.clone(),
                phase,
                source: Box::new(other),
            },
        }
    }

    /// Innermost error, past any phase context.
    pub fn root_cause(&self) -> &InstallerError {
        match self {
            Self::Phase { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Manifest { .. } => vec![
                "A kustomization could not be rendered as YAML".into(),
                "Check that generated file names are plain text".into(),
            ],
            Self::Phase {
                namespace,
                phase,
                source,
            } => {
                let mut out = source.suggestions();
                out.push(format!(
                    "The {} of namespace '{}' is incomplete; re-run the whole build after fixing",
                    phase, namespace
                ));
                out
            }
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Manifest { .. } => ErrorCategory::Internal,
            Self::Phase { source, .. } => source.category(),
        }
    }
}

impl From<serde_yaml::Error> for InstallerError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Manifest {
            message: e.to_string(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type InstallerResult<T> = Result<T, InstallerError>;
