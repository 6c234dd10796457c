//! Installer Service - main application orchestrator.
//!
//! This service coordinates the whole installer build:
//! 1. Validate the application
//! 2. Build the base layer of every namespace
//! 3. Build the template layer of every namespace
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, LayoutResolver},
        services::{BaseLayerBuilder, TemplateLayerBuilder},
    },
    domain::{
        Application, DomainValidator as validator, InstallerPlan, InstallerReport, Namespace,
        NamespacePlan, Phase,
    },
    error::InstallerResult,
};

/// Main installer service.
///
/// Runs the base phase to completion for all namespaces before the template
/// phase starts. The first failure ends the run.
pub struct InstallerService {
    filesystem: Box<dyn Filesystem>,
    layout: Box<dyn LayoutResolver>,
}

impl InstallerService {
    /// Create a new installer service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kinstall_adapters::{MemoryFilesystem, StandardLayout};
    /// use kinstall_core::application::InstallerService;
    ///
    /// let service = InstallerService::new(
    ///     Box::new(MemoryFilesystem::new()),
    ///     Box::new(StandardLayout::new("/work", "/installer")),
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, layout: Box<dyn LayoutResolver>) -> Self {
        Self { filesystem, layout }
    }

    /// Build the installer package.
    ///
    /// This is the main use case - lays out base and template layers for
    /// every namespace of `app`.
    #[instrument(skip_all, fields(namespaces = app.len()))]
    pub fn build(&self, app: &Application) -> InstallerResult<InstallerReport> {
        validator::validate_application(app)?;

        if app.is_empty() {
            warn!("No namespaces declared, nothing to build");
            return Ok(InstallerReport::default());
        }

        info!("Building base layers");
        let base = self.base_builder().build(app)?;

        info!("Building template layers");
        let template = self.template_builder().build(app)?;

        info!("Installer build completed");
        Ok(InstallerReport { base, template })
    }

    /// Describe what [`Self::build`] would move and generate, without
    /// touching the filesystem.
    #[instrument(skip_all, fields(namespaces = app.len()))]
    pub fn plan(&self, app: &Application) -> InstallerResult<InstallerPlan> {
        validator::validate_application(app)?;

        let namespaces = app
            .namespaces()
            .iter()
            .map(|ns| self.plan_namespace(ns))
            .collect::<InstallerResult<Vec<_>>>()?;

        Ok(InstallerPlan { namespaces })
    }

    pub fn base_builder(&self) -> BaseLayerBuilder<'_> {
        BaseLayerBuilder::new(self.filesystem.as_ref(), self.layout.as_ref())
    }

    pub fn template_builder(&self) -> TemplateLayerBuilder<'_> {
        TemplateLayerBuilder::new(self.filesystem.as_ref(), self.layout.as_ref())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn plan_namespace(&self, namespace: &Namespace) -> InstallerResult<NamespacePlan> {
        let folders = self.layout.folders(namespace);

        let manifests = self
            .base_builder()
            .collect_manifests(&folders.output)
            .map_err(|e| e.in_phase(namespace, Phase::Base))?;

        let template = self.template_builder();
        let params = template
            .collect_env_files(&folders.params_staging)
            .map_err(|e| e.in_phase(namespace, Phase::Template))?;
        let secrets = template
            .collect_env_files(&folders.secrets_staging)
            .map_err(|e| e.in_phase(namespace, Phase::Template))?;

        Ok(NamespacePlan {
            namespace: namespace.clone(),
            folders,
            manifests,
            params,
            secrets,
        })
    }
}
