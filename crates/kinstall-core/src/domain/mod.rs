// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Kinstall.
//!
//! This module contains pure installer-layout rules. All I/O is handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable value objects**: `Namespace` is validated once, then shared
//! - **Structured manifests**: kustomizations are data, serialized in one go
//!
pub mod entities;
pub mod error;
pub mod files;
pub mod value_objects;

mod validation;

pub use entities::{
    application::Application,
    kustomization::{GeneratorBehavior, GeneratorEntry, GeneratorOptions, Kustomization},
    layout::{
        ENV_SUFFIX, KUSTOMIZATION_FILE, NamespaceFolders, PARAMS_FOLDER, SECRETS_FOLDER,
        kustomization_file_in, to_manifest_path,
    },
    report::{
        BaseLayerReport, InstallerPlan, InstallerReport, NamespacePlan, TemplateLayerReport,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use files::{file_name_of, generator_name, is_manifest_file};

pub use value_objects::{Namespace, Phase};

pub use validation::DomainValidator;
