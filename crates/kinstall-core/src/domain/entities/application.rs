use std::collections::HashSet;

use crate::domain::{error::DomainError, value_objects::Namespace};

/// An application spread over one or more namespaces.
///
/// Order is processing order and carries no other meaning. An application
/// with no namespaces is legal and builds nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Application {
    namespaces: Vec<Namespace>,
}

impl Application {
    /// Create an application, rejecting repeated namespaces.
    pub fn new(namespaces: Vec<Namespace>) -> Result<Self, DomainError> {
        let app = Self { namespaces };
        app.validate()?;
        Ok(app)
    }

    /// Parse namespace names and build an application from them.
    pub fn from_names<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let namespaces = names
            .into_iter()
            .map(Namespace::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(namespaces)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for ns in &self.namespaces {
            if !seen.insert(ns.as_str()) {
                return Err(DomainError::DuplicateNamespace {
                    name: ns.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }
}
