//! Application layer for Kinstall.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (InstallerService and the two layer builders)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences filesystem work; the rules for what goes
//! where live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{BaseLayerBuilder, InstallerService, TemplateLayerBuilder};

pub use ports::{Filesystem, LayoutResolver, WalkDepth};

pub use error::ApplicationError;
