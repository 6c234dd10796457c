use std::path::{Path, PathBuf};

use serde::Serialize;

/// File name of the assembly manifest inside every layer folder.
pub const KUSTOMIZATION_FILE: &str = "kustomization.yaml";

/// Subfolder of the template folder holding config-map env files.
pub const PARAMS_FOLDER: &str = "params";

/// Subfolder of the template folder holding secret env files.
pub const SECRETS_FOLDER: &str = "secrets";

/// Suffix stripped from env files to obtain the generator name.
pub const ENV_SUFFIX: &str = ".env";

/// The folder roles of a single namespace, as resolved by a layout resolver.
///
/// Folder identity is fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceFolders {
    /// Raw manifests produced by the generation step.
    pub output: PathBuf,
    /// Base layer: relocated manifests plus their kustomization.
    pub base: PathBuf,
    /// Overlay layer: generators referencing the base.
    pub template: PathBuf,
    /// Staged config-map env files.
    pub params_staging: PathBuf,
    /// Staged secret env files.
    pub secrets_staging: PathBuf,
}

impl NamespaceFolders {
    pub fn base_kustomization(&self) -> PathBuf {
        kustomization_file_in(&self.base)
    }

    pub fn template_kustomization(&self) -> PathBuf {
        kustomization_file_in(&self.template)
    }

    /// Final location of the params folder inside the overlay.
    pub fn params(&self) -> PathBuf {
        self.template.join(PARAMS_FOLDER)
    }

    /// Final location of the secrets folder inside the overlay.
    pub fn secrets(&self) -> PathBuf {
        self.template.join(SECRETS_FOLDER)
    }

    /// Path of the base folder relative to the template folder, as written
    /// into the overlay's `resources:` section.
    ///
    /// Falls back to the absolute base path when no relative path exists
    /// (e.g. one path is relative and the other absolute).
    pub fn base_reference(&self) -> String {
        let rel = pathdiff::diff_paths(&self.base, &self.template)
            .unwrap_or_else(|| self.base.clone());
        to_manifest_path(&rel)
    }
}

/// Path of the kustomization file in `folder`.
pub fn kustomization_file_in(folder: &Path) -> PathBuf {
    folder.join(KUSTOMIZATION_FILE)
}

/// Render a path with `/` separators, as kustomize expects on every platform.
pub fn to_manifest_path(path: &Path) -> String {
    if path.has_root() {
        return path.display().to_string();
    }
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
