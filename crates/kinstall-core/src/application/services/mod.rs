//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build the installer" or "plan a build".

pub mod base_layer;
pub mod installer_service;
pub mod template_layer;

pub use base_layer::BaseLayerBuilder;
pub use installer_service::InstallerService;
pub use template_layer::TemplateLayerBuilder;
