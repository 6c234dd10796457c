//! Template (overlay) layer builder.
//!
//! Moves the staged params and secrets folders into the namespace's template
//! folder and writes an overlay kustomization that references the base layer
//! and declares one generator per env file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, LayoutResolver, WalkDepth},
    },
    domain::{
        Application, GeneratorBehavior, GeneratorEntry, Kustomization, Namespace,
        NamespaceFolders, PARAMS_FOLDER, Phase, SECRETS_FOLDER, TemplateLayerReport,
        file_name_of, generator_name,
    },
    error::InstallerResult,
};

/// Builds the template layer of every namespace.
///
/// Expects the base layer to be in place already; it is referenced by
/// relative path, never copied.
pub struct TemplateLayerBuilder<'a> {
    filesystem: &'a dyn Filesystem,
    layout: &'a dyn LayoutResolver,
}

impl<'a> TemplateLayerBuilder<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, layout: &'a dyn LayoutResolver) -> Self {
        Self { filesystem, layout }
    }

    /// Build the template layer of each namespace, in order. Stops at the
    /// first failure.
    pub fn build(&self, app: &Application) -> InstallerResult<Vec<TemplateLayerReport>> {
        app.namespaces()
            .iter()
            .map(|ns| {
                self.build_namespace(ns)
                    .map_err(|e| e.in_phase(ns, Phase::Template))
            })
            .collect()
    }

    /// Build the template layer of a single namespace.
    #[instrument(skip(self), fields(namespace = %namespace))]
    pub fn build_namespace(&self, namespace: &Namespace) -> InstallerResult<TemplateLayerReport> {
        let folders = self.layout.folders(namespace);
        info!(template = %folders.template.display(), "Creating kustomize template");

        self.stage_env_folders(&folders)?;

        let base_reference = folders.base_reference();
        let mut kustomization = Kustomization::overlay(base_reference.as_str());

        // Both walks are fatal on their own; a failed params walk never
        // silently drops the secret generators.
        let config_maps =
            self.generator_entries(&folders.params(), PARAMS_FOLDER, GeneratorBehavior::Merge)?;
        for entry in config_maps {
            debug!(name = %entry.name, "Adding configMapGenerator");
            kustomization.add_config_map(entry);
        }
        let secrets =
            self.generator_entries(&folders.secrets(), SECRETS_FOLDER, GeneratorBehavior::Create)?;
        for entry in secrets {
            debug!(name = %entry.name, "Adding secretGenerator");
            kustomization.add_secret(entry);
        }

        self.filesystem
            .write_file(&folders.template_kustomization(), &kustomization.to_yaml()?)?;

        let config_maps = names(kustomization.config_maps());
        let secrets = names(kustomization.secrets());
        info!(
            config_maps = config_maps.len(),
            secrets = secrets.len(),
            "Template layer written"
        );

        Ok(TemplateLayerReport {
            namespace: namespace.clone(),
            template_folder: folders.template,
            base_reference,
            config_maps,
            secrets,
        })
    }

    /// Env files directly inside a staging folder, sorted by path.
    pub fn collect_env_files(&self, folder: &Path) -> InstallerResult<Vec<PathBuf>> {
        if !self.filesystem.is_dir(folder) {
            return Err(ApplicationError::MissingFolder {
                path: folder.to_path_buf(),
            }
            .into());
        }
        self.filesystem.walk_files(folder, WalkDepth::Shallow)
    }

    /// Move both staging folders, as units, under the template folder.
    ///
    /// Every precondition is checked before the first move so a refused
    /// build leaves the staging area untouched.
    fn stage_env_folders(&self, folders: &NamespaceFolders) -> InstallerResult<()> {
        let moves = [
            (&folders.params_staging, folders.params()),
            (&folders.secrets_staging, folders.secrets()),
        ];

        for (staging, destination) in &moves {
            if !self.filesystem.is_dir(staging) {
                return Err(ApplicationError::MissingFolder {
                    path: staging.to_path_buf(),
                }
                .into());
            }
            if self.filesystem.exists(destination) {
                return Err(ApplicationError::DestinationExists {
                    path: destination.clone(),
                }
                .into());
            }
        }

        self.filesystem.create_dir_all(&folders.template)?;

        for (staging, destination) in &moves {
            self.filesystem.rename(staging, destination)?;
            debug!(
                from = %staging.display(),
                to = %destination.display(),
                "Moved staging folder"
            );
        }

        Ok(())
    }

    /// One generator entry per file in `folder`, sourced from
    /// `<subfolder>/<file>`.
    fn generator_entries(
        &self,
        folder: &Path,
        subfolder: &str,
        behavior: GeneratorBehavior,
    ) -> InstallerResult<Vec<GeneratorEntry>> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for file in self.collect_env_files(folder)? {
            let file_name = file_name_of(&file)?;
            let name = generator_name(file_name);
            if !seen.insert(name.clone()) {
                warn!(
                    name = %name,
                    file = %file.display(),
                    "Several env files map to the same generator name"
                );
            }
            entries.push(GeneratorEntry::from_env_file(
                name,
                behavior,
                format!("{subfolder}/{file_name}"),
            ));
        }

        Ok(entries)
    }
}

fn names(entries: &[GeneratorEntry]) -> Vec<String> {
    entries.iter().map(|e| e.name.clone()).collect()
}
