// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `upkeep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "upkeep",
    version,
    about = "Update the package index, upgrade packages, remove orphans and clean the cache.",
    long_about = None
)]
pub struct CliArgs {
    /// Show what would be run without executing any package-manager command.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the config file (TOML).
    ///
    /// If omitted, `Upkeep.toml` in the current directory is used when it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append the run log to this file instead of the configured one.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Diagnostics level (error, warn, info, debug, trace).
    ///
    /// If omitted, `UPKEEP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Disable colors and the spinner.
    #[arg(long)]
    pub plain: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
