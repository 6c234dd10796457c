//! Implementation of the `kinstall build` command.
//!
//! Responsibility: turn CLI arguments and configuration into an
//! `Application` and a layout, call the core installer service, and display
//! results. No layout rules live here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use kinstall_adapters::{LocalFilesystem, StandardLayout};
use kinstall_core::{
    application::InstallerService,
    domain::{Application, InstallerPlan, InstallerReport, to_manifest_path},
    error::InstallerError,
};

use crate::{
    cli::BuildArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// What a single `build` invocation operates on, after flags have been
/// merged over the configuration.
#[derive(Debug)]
struct BuildSettings {
    application: Application,
    layout: StandardLayout,
    dry_run: bool,
}

impl BuildSettings {
    /// Flags win over configuration. Namespaces from the command line replace
    /// the configured list instead of extending it.
    fn resolve(args: BuildArgs, config: &AppConfig) -> CliResult<Self> {
        let names = if args.namespaces.is_empty() {
            config.application.namespaces.clone()
        } else {
            args.namespaces
        };
        let application = Application::from_names(names).map_err(InstallerError::from)?;

        let work_dir = args
            .work_dir
            .unwrap_or_else(|| config.layout.work_dir.clone());
        let installer_dir = args
            .installer_dir
            .unwrap_or_else(|| config.layout.installer_dir.clone());

        Ok(Self {
            application,
            layout: StandardLayout::new(work_dir, installer_dir),
            dry_run: args.dry_run,
        })
    }

    fn service(&self) -> InstallerService {
        InstallerService::new(
            Box::new(LocalFilesystem::new()),
            Box::new(self.layout.clone()),
        )
    }
}

/// Execute the `kinstall build` command.
///
/// 1. Resolve namespaces and directories
/// 2. Early-exit with a plan if `--dry-run`
/// 3. Build base then template layers via `InstallerService`
/// 4. Print a per-namespace summary
#[instrument(skip_all)]
pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = BuildSettings::resolve(args, &config)?;

    debug!(
        namespaces = settings.application.len(),
        work_dir = %settings.layout.work_dir().display(),
        installer_dir = %settings.layout.installer_dir().display(),
        dry_run = settings.dry_run,
        "Build settings resolved"
    );

    if settings.application.is_empty() {
        output.warning(
            "No namespaces to build; pass --namespace or set application.namespaces",
        )?;
        return Ok(());
    }

    let service = settings.service();

    if settings.dry_run {
        let plan = service.plan(&settings.application).map_err(CliError::Core)?;
        return if output.is_json() {
            output.json(&plan)
        } else {
            show_plan(&plan, &output)
        };
    }

    if !output.is_json() {
        output.header(&format!(
            "Building installer in {}",
            settings.layout.installer_dir().display()
        ))?;
    }
    info!(namespaces = settings.application.len(), "Build started");

    let report = service
        .build(&settings.application)
        .map_err(CliError::Core)?;

    info!(
        resources = report.resource_count(),
        generators = report.generator_count(),
        "Build completed"
    );

    if output.is_json() {
        output.json(&report)
    } else {
        show_report(&report, &output)
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn show_report(report: &InstallerReport, output: &OutputManager) -> CliResult<()> {
    for (base, template) in report.base.iter().zip(&report.template) {
        output.success(&format!(
            "{}: {} resource(s), {} config map(s), {} secret(s)",
            base.namespace,
            base.resources.len(),
            template.config_maps.len(),
            template.secrets.len(),
        ))?;
        if !output.is_quiet() {
            output.print(&format!("    base      {}", base.base_folder.display()))?;
            output.print(&format!(
                "    template  {}",
                template.template_folder.display()
            ))?;
        }
    }

    output.success(&format!(
        "Installer built for {} namespace(s)",
        report.base.len()
    ))?;
    Ok(())
}

fn show_plan(plan: &InstallerPlan, output: &OutputManager) -> CliResult<()> {
    output.info("Dry run: nothing will be moved or written")?;

    for ns in &plan.namespaces {
        output.header(ns.namespace.as_str())?;
        show_moves(output, "manifests", &ns.manifests, &ns.folders.base)?;
        show_moves(output, "params", &ns.params, &ns.folders.params())?;
        show_moves(output, "secrets", &ns.secrets, &ns.folders.secrets())?;
        output.print(&format!(
            "  overlay references {}",
            ns.folders.base_reference()
        ))?;
    }
    Ok(())
}

fn show_moves(
    output: &OutputManager,
    label: &str,
    files: &[PathBuf],
    destination: &Path,
) -> CliResult<()> {
    output.print(&format!(
        "  {label}: {} file(s) -> {}",
        files.len(),
        destination.display()
    ))?;
    for file in files {
        output.print(&format!("    {}", to_manifest_path(file)))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(namespaces: &[&str]) -> BuildArgs {
        BuildArgs {
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
            work_dir: None,
            installer_dir: None,
            dry_run: false,
        }
    }

    fn config_with(namespaces: &[&str]) -> AppConfig {
        let mut config = AppConfig::default();
        config.application.namespaces = namespaces.iter().map(|s| s.to_string()).collect();
        config
    }

    fn names(settings: &BuildSettings) -> Vec<&str> {
        settings
            .application
            .namespaces()
            .iter()
            .map(|ns| ns.as_str())
            .collect()
    }

    #[test]
    fn flags_replace_configured_namespaces() {
        let settings =
            BuildSettings::resolve(args(&["shop"]), &config_with(&["billing", "auth"])).unwrap();
        assert_eq!(names(&settings), ["shop"]);
    }

    #[test]
    fn configured_namespaces_used_without_flags() {
        let settings = BuildSettings::resolve(args(&[]), &config_with(&["billing", "auth"])).unwrap();
        assert_eq!(names(&settings), ["billing", "auth"]);
    }

    #[test]
    fn directory_flags_override_config() {
        let mut build = args(&["shop"]);
        build.installer_dir = Some(PathBuf::from("dist"));

        let settings = BuildSettings::resolve(build, &AppConfig::default()).unwrap();

        assert_eq!(settings.layout.installer_dir(), Path::new("dist"));
        assert_eq!(settings.layout.work_dir(), Path::new("work"));
    }

    #[test]
    fn invalid_namespace_is_user_error() {
        let err = BuildSettings::resolve(args(&["bad name"]), &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn duplicate_namespace_is_user_error() {
        let err =
            BuildSettings::resolve(args(&["shop", "shop"]), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
