use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{entities::layout::NamespaceFolders, value_objects::Namespace};

/// Outcome of the base phase for one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseLayerReport {
    pub namespace: Namespace,
    pub base_folder: PathBuf,
    /// Relocated manifest file names, in kustomization order.
    pub resources: Vec<String>,
}

/// Outcome of the template phase for one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateLayerReport {
    pub namespace: Namespace,
    pub template_folder: PathBuf,
    pub base_reference: String,
    /// Config-map generator names, in kustomization order.
    pub config_maps: Vec<String>,
    /// Secret generator names, in kustomization order.
    pub secrets: Vec<String>,
}

/// Outcome of a full installer build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallerReport {
    pub base: Vec<BaseLayerReport>,
    pub template: Vec<TemplateLayerReport>,
}

impl InstallerReport {
    pub fn resource_count(&self) -> usize {
        self.base.iter().map(|b| b.resources.len()).sum()
    }

    pub fn generator_count(&self) -> usize {
        self.template
            .iter()
            .map(|t| t.config_maps.len() + t.secrets.len())
            .sum()
    }
}

/// What a build would do for one namespace, without doing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespacePlan {
    pub namespace: Namespace,
    pub folders: NamespaceFolders,
    pub manifests: Vec<PathBuf>,
    pub params: Vec<PathBuf>,
    pub secrets: Vec<PathBuf>,
}

/// Dry-run view of a whole build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallerPlan {
    pub namespaces: Vec<NamespacePlan>,
}
