//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `KINSTALL__<SECTION>__<KEY>`
//! 3. Config file: `--config FILE`, else the platform config file, else
//!    `.kinstall.toml` in the current directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".kinstall.toml";

const ENV_PREFIX: &str = "KINSTALL";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the build reads from and writes to.
    pub layout: LayoutConfig,
    /// Namespaces built when none are given on the command line.
    pub application: ApplicationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub work_dir: PathBuf,
    pub installer_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("work"),
            installer_dir: PathBuf::from("installer"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub namespaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let file = match config_file {
            Some(path) => Some((path.to_path_buf(), true)),
            None => Self::active_config_path().map(|path| (path, false)),
        };

        let source = file
            .as_ref()
            .map(|(path, required)| (path.as_path(), *required));

        let config = Self::builder(source)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("application.namespaces")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error("Failed to load configuration"))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(config_error("Invalid configuration"))?;

        debug!(
            file = ?file.map(|(path, _)| path),
            work_dir = %loaded.layout.work_dir.display(),
            installer_dir = %loaded.layout.installer_dir.display(),
            namespaces = loaded.application.namespaces.len(),
            "Configuration loaded"
        );
        Ok(loaded)
    }

    fn builder(
        file: Option<(&Path, bool)>,
    ) -> CliResult<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Config::try_from(&Self::default())
            .map_err(config_error("Failed to prepare default configuration"))?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some((path, required)) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }
        Ok(builder)
    }

    /// Path to the default (per-user) configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kinstall.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "kinstall", "kinstall")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file [`Self::load`] reads when no `--config` is given, if any.
    pub fn active_config_path() -> Option<PathBuf> {
        [Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)]
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Serialize as TOML, as written by `kinstall init`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(context: &'static str) -> impl Fn(config::ConfigError) -> CliError {
    move |e| CliError::ConfigError {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}
