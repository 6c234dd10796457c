//! Default folder layout for a build.
//!
//! ```text
//! <work_dir>/
//! ├── output/<ns>/             generated manifests (consumed)
//! └── staging/<ns>/
//!     ├── params/              config-map env files (moved)
//!     └── secrets/             secret env files (moved)
//!
//! <installer_dir>/<ns>/
//! ├── base/                    relocated manifests + kustomization.yaml
//! └── template/                overlay kustomization.yaml
//!     ├── params/
//!     └── secrets/
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use kinstall_core::{
    application::ports::LayoutResolver,
    domain::{Namespace, NamespaceFolders, PARAMS_FOLDER, SECRETS_FOLDER},
};

const OUTPUT_FOLDER: &str = "output";
const STAGING_FOLDER: &str = "staging";
const BASE_FOLDER: &str = "base";
const TEMPLATE_FOLDER: &str = "template";

/// Resolves namespace folders below a work directory and an installer
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardLayout {
    work_dir: PathBuf,
    installer_dir: PathBuf,
}

impl StandardLayout {
    pub fn new(work_dir: impl Into<PathBuf>, installer_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            installer_dir: installer_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn installer_dir(&self) -> &Path {
        &self.installer_dir
    }

    pub fn output_folder(&self, namespace: &Namespace) -> PathBuf {
        self.work_dir.join(OUTPUT_FOLDER).join(namespace.as_str())
    }

    pub fn staging_folder(&self, namespace: &Namespace) -> PathBuf {
        self.work_dir.join(STAGING_FOLDER).join(namespace.as_str())
    }

    pub fn namespace_folder(&self, namespace: &Namespace) -> PathBuf {
        self.installer_dir.join(namespace.as_str())
    }
}

impl LayoutResolver for StandardLayout {
    fn folders(&self, namespace: &Namespace) -> NamespaceFolders {
        let staging = self.staging_folder(namespace);
        let installer = self.namespace_folder(namespace);

        NamespaceFolders {
            output: self.output_folder(namespace),
            base: installer.join(BASE_FOLDER),
            template: installer.join(TEMPLATE_FOLDER),
            params_staging: staging.join(PARAMS_FOLDER),
            secrets_staging: staging.join(SECRETS_FOLDER),
        }
    }
}
