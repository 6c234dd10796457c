//! Kinstall Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Kinstall
//! installer builder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          kinstall-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (InstallerService, Base/Template layer) │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, LayoutResolver)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    kinstall-adapters (Infrastructure)   │
//! │ (LocalFilesystem, MemoryFilesystem, ...)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Namespace, Application, Kustomization) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kinstall_adapters::{LocalFilesystem, StandardLayout};
//! use kinstall_core::{application::InstallerService, domain::Application};
//!
//! // 1. Describe the application
//! let app = Application::from_names(["shop", "billing"])?;
//!
//! // 2. Use application service (with injected adapters)
//! let service = InstallerService::new(
//!     Box::new(LocalFilesystem::new()),
//!     Box::new(StandardLayout::new("work", "installer")),
//! );
//! let report = service.build(&app)?;
//! println!("{} resources relocated", report.resource_count());
//! # Ok::<(), kinstall_core::error::InstallerError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BaseLayerBuilder, InstallerService, TemplateLayerBuilder,
        ports::{Filesystem, LayoutResolver, WalkDepth},
    };
    pub use crate::domain::{
        Application, GeneratorBehavior, GeneratorEntry, InstallerPlan, InstallerReport,
        Kustomization, Namespace, NamespaceFolders, Phase,
    };
    pub use crate::error::{InstallerError, InstallerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
