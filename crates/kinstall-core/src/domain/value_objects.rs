//! Value objects: small, immutable, validated at construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ============================================================================
// Namespace
// ============================================================================

/// A Kubernetes namespace the installer is built for.
///
/// The name is used verbatim as a folder name by the layout resolver, so it is
/// validated to be a single, non-hidden path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let name = name.trim().to_string();

        let reject = |reason: &str| {
            Err(DomainError::InvalidNamespace {
                name: name.clone(),
                reason: reason.into(),
            })
        };

        if name.is_empty() {
            return reject("name cannot be empty");
        }
        if name.starts_with('.') {
            return reject("name cannot start with '.'");
        }
        if name.contains('/') || name.contains('\\') {
            return reject("name cannot contain path separators");
        }
        if name.chars().any(char::is_whitespace) {
            return reject("name cannot contain whitespace");
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Namespace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Builder phase a namespace is being processed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Relocation of generated manifests into the base layer.
    Base,
    /// Staging of env files and generator wiring in the overlay.
    Template,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base layer"),
            Self::Template => write!(f, "template layer"),
        }
    }
}
