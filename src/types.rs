use std::fmt;

use serde::Deserialize;

/// Whether commands are actually executed.
///
/// Chosen once at startup and never changed during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Report what would run, execute nothing.
    DryRun,
    Live,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { RunMode::DryRun } else { RunMode::Live }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

/// How terminal output is rendered.
///
/// - `Rich`: ANSI colors, unicode markers and the spinner.
/// - `Plain`: bracketed text markers, no escape codes, no animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Rich,
    Plain,
}

/// Kind of a status line printed by the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
    Info,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusKind::Success => "ok",
            StatusKind::Warning => "warn",
            StatusKind::Error => "error",
            StatusKind::Info => "info",
        };
        f.write_str(s)
    }
}
