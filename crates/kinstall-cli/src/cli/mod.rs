//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kinstall",
    bin_name = "kinstall",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Build kustomize installer layers from generated manifests",
    long_about = "Kinstall moves generated Kubernetes manifests into a kustomize \
                  base layer and staged env files into a template overlay, \
                  one pair per namespace.",
    after_help = "EXAMPLES:\n\
        \x20 kinstall build --namespace shop --namespace billing\n\
        \x20 kinstall build --work-dir ./work --installer-dir ./installer --dry-run\n\
        \x20 kinstall completions bash > /usr/share/bash-completion/completions/kinstall",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the base and template layers of every namespace.
    #[command(
        visible_alias = "b",
        about = "Build the installer layers",
        after_help = "EXAMPLES:\n\
            \x20 kinstall build -n shop\n\
            \x20 kinstall build -n shop -n billing --installer-dir dist/installer\n\
            \x20 kinstall build --dry-run --output-format json"
    )]
    Build(BuildArgs),

    /// Initialise a Kinstall configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kinstall init           # default location\n\
            \x20 kinstall init --local   # .kinstall.toml in CWD\n\
            \x20 kinstall init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kinstall completions bash > ~/.local/share/bash-completion/completions/kinstall\n\
            \x20 kinstall completions zsh  > ~/.zfunc/_kinstall\n\
            \x20 kinstall completions fish > ~/.config/fish/completions/kinstall.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Kinstall configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kinstall config get layout.work_dir\n\
            \x20 kinstall config list\n\
            \x20 kinstall config path"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `kinstall build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Namespaces to build, in order. Replaces `application.namespaces`
    /// from the configuration when given.
    #[arg(
        short = 'n',
        long = "namespace",
        value_name = "NAMESPACE",
        help = "Namespace to build (repeatable)"
    )]
    pub namespaces: Vec<String>,

    /// Directory holding `output/` and `staging/`.
    #[arg(
        short = 'w',
        long = "work-dir",
        value_name = "DIR",
        help = "Work directory with generated output and staging folders"
    )]
    pub work_dir: Option<PathBuf>,

    /// Directory receiving `<namespace>/base` and `<namespace>/template`.
    #[arg(
        short = 'i',
        long = "installer-dir",
        value_name = "DIR",
        help = "Installer directory to build into"
    )]
    pub installer_dir: Option<PathBuf>,

    /// Preview what would be moved and generated without touching files.
    #[arg(long = "dry-run", help = "Show the build plan without moving files")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kinstall init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.kinstall.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kinstall completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kinstall config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `layout.work_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_build_with_repeated_namespaces() {
        let cli = Cli::parse_from(["kinstall", "build", "-n", "shop", "--namespace", "billing"]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.namespaces, ["shop", "billing"]);
        assert!(!args.dry_run);
    }

    #[test]
    fn parse_build_directories() {
        let cli = Cli::parse_from([
            "kinstall",
            "build",
            "--work-dir",
            "w",
            "--installer-dir",
            "i",
            "--dry-run",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.work_dir, Some(PathBuf::from("w")));
        assert_eq!(args.installer_dir, Some(PathBuf::from("i")));
        assert!(args.dry_run);
    }

    #[test]
    fn build_alias() {
        let cli = Cli::parse_from(["kinstall", "b"]);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["kinstall", "build", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kinstall", "--quiet", "--verbose", "build"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_set_is_not_a_command() {
        let result = Cli::try_parse_from(["kinstall", "config", "set", "a", "b"]);
        assert!(result.is_err());
    }
}
