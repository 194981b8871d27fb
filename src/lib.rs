// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod privilege;
pub mod report;
pub mod runlog;
pub mod types;

use std::io::IsTerminal;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::resolve_config;
use crate::config::validate::validate_section;
use crate::engine::{Orchestrator, OrchestratorOptions};
use crate::errors::Result;
use crate::exec::{CommandRunner, ProcessBackend};
use crate::privilege::{EffectiveUid, PrivilegeGuard};
use crate::report::Reporter;
use crate::runlog::RunLog;
use crate::types::{OutputStyle, RunMode};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the run log
/// - the privilege gate, command runner and reporter
/// - the orchestrator
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = effective_config(&args)?;
    let mode = RunMode::from_dry_run(args.dry_run);
    let reporter = Reporter::new(
        effective_style(args.plain, &cfg),
        cfg.spinner_duration(),
    );

    // An unwritable log must not mask the privilege gate's own error.
    let log = RunLog::open_or_disabled(&cfg.config.log_file);
    info!(
        log_file = %cfg.config.log_file.display(),
        package_manager = %cfg.config.package_manager,
        dry_run = mode.is_dry_run(),
        "starting upkeep"
    );

    let runner = CommandRunner::new(ProcessBackend::new(), mode, reporter.clone(), &log);
    let guard = PrivilegeGuard::new(EffectiveUid, rerun_hint(&args));
    let options = OrchestratorOptions {
        package_manager: cfg.config.package_manager.clone(),
        show_output: cfg.config.show_output,
    };

    let mut orchestrator = Orchestrator::new(runner, guard, reporter, options);
    orchestrator.run().await?;
    debug!(stage = ?orchestrator.stage(), "orchestrator finished");
    Ok(())
}

/// Config file values with CLI overrides applied, re-validated.
pub fn effective_config(args: &CliArgs) -> Result<ConfigFile> {
    let mut cfg = resolve_config(args.config.as_deref())?;

    if let Some(ref path) = args.log_file {
        cfg.config.log_file = path.clone();
    }
    if args.plain {
        cfg.config.style = OutputStyle::Plain;
    }

    validate_section(&cfg.config)?;
    Ok(cfg)
}

/// Rich output only when asked for and stdout is an interactive terminal.
pub fn effective_style(plain_flag: bool, cfg: &ConfigFile) -> OutputStyle {
    if plain_flag || cfg.config.style == OutputStyle::Plain || !std::io::stdout().is_terminal() {
        OutputStyle::Plain
    } else {
        OutputStyle::Rich
    }
}

/// The command line to suggest when privilege is missing.
fn rerun_hint(args: &CliArgs) -> String {
    let mut hint = env!("CARGO_PKG_NAME").to_string();
    if args.dry_run {
        hint.push_str(" --dry-run");
    }
    hint
}
