//! In-memory model of a `kustomization.yaml` assembly manifest.
//!
//! A manifest is accumulated section by section and serialized once, so a
//! failure part-way through a namespace never leaves a half-written file.
//!
//! Sections are always emitted in the same order:
//!
//! ```yaml
//! resources:
//! - ../base
//! generatorOptions:
//!   disableNameSuffixHash: true
//! configMapGenerator:
//! - name: app
//!   behavior: merge
//!   envs:
//!   - params/app.env
//! secretGenerator:
//! - name: db
//!   behavior: create
//!   envs:
//!   - secrets/db.env
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a generated object combines with an object of the same name coming
/// from an underlying layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorBehavior {
    Create,
    Merge,
}

impl fmt::Display for GeneratorBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

/// A single `configMapGenerator` or `secretGenerator` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorEntry {
    pub name: String,
    pub behavior: GeneratorBehavior,
    pub envs: Vec<String>,
}

impl GeneratorEntry {
    /// Entry sourced from a single env file.
    pub fn from_env_file(
        name: impl Into<String>,
        behavior: GeneratorBehavior,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            behavior,
            envs: vec![source.into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub disable_name_suffix_hash: bool,
}

/// Assembly manifest of a layer folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_options: Option<GeneratorOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_generator: Option<Vec<GeneratorEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_generator: Option<Vec<GeneratorEntry>>,
}

impl Kustomization {
    /// Base-layer manifest: a `resources:` list and nothing else.
    pub fn base() -> Self {
        Self::default()
    }

    /// Overlay manifest referencing `base_ref`, with stable generated names
    /// and (initially empty) generator sections.
    pub fn overlay(base_ref: impl Into<String>) -> Self {
        Self {
            resources: vec![base_ref.into()],
            generator_options: Some(GeneratorOptions {
                disable_name_suffix_hash: true,
            }),
            config_map_generator: Some(Vec::new()),
            secret_generator: Some(Vec::new()),
        }
    }

    pub fn add_resource(&mut self, resource: impl Into<String>) {
        self.resources.push(resource.into());
    }

    pub fn add_config_map(&mut self, entry: GeneratorEntry) {
        self.config_map_generator
            .get_or_insert_with(Vec::new)
            .push(entry);
    }

    pub fn add_secret(&mut self, entry: GeneratorEntry) {
        self.secret_generator.get_or_insert_with(Vec::new).push(entry);
    }

    pub fn config_maps(&self) -> &[GeneratorEntry] {
        self.config_map_generator.as_deref().unwrap_or_default()
    }

    pub fn secrets(&self) -> &[GeneratorEntry] {
        self.secret_generator.as_deref().unwrap_or_default()
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
