//! Command handlers, one module per subcommand.

pub mod build;
pub mod completions;
pub mod config;
pub mod init;
