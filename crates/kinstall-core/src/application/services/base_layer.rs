//! Base layer builder.
//!
//! Relocates every generated manifest of a namespace into its base folder,
//! flattening any nesting, and writes a kustomization listing them:
//!
//! ```text
//! output/shop/                    installer/shop/base/
//! ├── deploy.yaml          ──►    ├── deploy.yaml
//! └── net/svc.yaml                ├── svc.yaml
//!                                 └── kustomization.yaml   (resources: [deploy.yaml, svc.yaml])
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, LayoutResolver, WalkDepth},
    },
    domain::{
        Application, BaseLayerReport, KUSTOMIZATION_FILE, Kustomization, Namespace, Phase,
        file_name_of, is_manifest_file,
    },
    error::InstallerResult,
};

/// Builds the base layer of every namespace.
pub struct BaseLayerBuilder<'a> {
    filesystem: &'a dyn Filesystem,
    layout: &'a dyn LayoutResolver,
}

impl<'a> BaseLayerBuilder<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, layout: &'a dyn LayoutResolver) -> Self {
        Self { filesystem, layout }
    }

    /// Build the base layer of each namespace, in order. Stops at the first
    /// failure.
    pub fn build(&self, app: &Application) -> InstallerResult<Vec<BaseLayerReport>> {
        app.namespaces()
            .iter()
            .map(|ns| {
                self.build_namespace(ns)
                    .map_err(|e| e.in_phase(ns, Phase::Base))
            })
            .collect()
    }

    /// Build the base layer of a single namespace.
    #[instrument(skip(self), fields(namespace = %namespace))]
    pub fn build_namespace(&self, namespace: &Namespace) -> InstallerResult<BaseLayerReport> {
        let folders = self.layout.folders(namespace);
        info!(
            output = %folders.output.display(),
            base = %folders.base.display(),
            "Building base layer"
        );

        // Snapshot first, then move: the walk never sees its own mutations.
        let manifests = self.collect_manifests(&folders.output)?;
        let moves = self.plan_moves(&manifests, &folders.base)?;

        self.filesystem.create_dir_all(&folders.base)?;

        let mut kustomization = Kustomization::base();
        for (source, name, destination) in &moves {
            self.filesystem.rename(source, destination)?;
            debug!(file = %name, from = %source.display(), "Relocated manifest");
            kustomization.add_resource(name.as_str());
        }

        self.filesystem
            .write_file(&folders.base_kustomization(), &kustomization.to_yaml()?)?;

        info!(resources = moves.len(), "Base layer written");

        Ok(BaseLayerReport {
            namespace: namespace.clone(),
            base_folder: folders.base,
            resources: kustomization.resources,
        })
    }

    /// Every manifest file below `output`, at any depth, sorted by path.
    pub fn collect_manifests(&self, output: &Path) -> InstallerResult<Vec<PathBuf>> {
        if !self.filesystem.is_dir(output) {
            return Err(ApplicationError::MissingFolder {
                path: output.to_path_buf(),
            }
            .into());
        }

        let files = self.filesystem.walk_files(output, WalkDepth::Recursive)?;
        let total = files.len();
        let manifests: Vec<_> = files.into_iter().filter(|p| is_manifest_file(p)).collect();

        debug!(
            manifests = manifests.len(),
            skipped = total - manifests.len(),
            "Collected manifests"
        );
        Ok(manifests)
    }

    /// Pair each manifest with its flattened destination, refusing collisions
    /// before anything is moved. A manifest named like the base kustomization
    /// collides with the file this builder writes.
    fn plan_moves(
        &self,
        manifests: &[PathBuf],
        base: &Path,
    ) -> InstallerResult<Vec<(PathBuf, String, PathBuf)>> {
        let mut seen = HashSet::new();
        let mut moves = Vec::with_capacity(manifests.len());

        for source in manifests {
            let name = file_name_of(source)?.to_string();
            let destination = base.join(&name);

            if name == KUSTOMIZATION_FILE
                || !seen.insert(name.clone())
                || self.filesystem.exists(&destination)
            {
                return Err(ApplicationError::DestinationExists { path: destination }.into());
            }
            moves.push((source.clone(), name, destination));
        }

        Ok(moves)
    }
}
