// src/runlog.rs

//! Persistent, append-only run log.
//!
//! Every command attempt and every fatal gate failure is written here as a
//! single line:
//!
//! ```text
//! 2026-10-19 08:15:02,417 - INFO - Command succeeded: apt update
//! ```
//!
//! The log is a write-only side channel: nothing in `upkeep` reads it back.
//! It is independent of `tracing` diagnostics (see [`crate::logging`]).

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::errors::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Severity of a [`LogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// One line of the run log.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    pub message: String,
}

impl LogRecord {
    pub fn now(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            message: message.into(),
        }
    }

    /// Render as `<timestamp> - <LEVEL> - <message>`.
    ///
    /// Multi-line messages (captured stderr) are folded onto one line so a
    /// record is always exactly one line of the file.
    pub fn to_line(&self) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.severity,
            fold_lines(&self.message)
        )
    }
}

fn fold_lines(message: &str) -> String {
    message
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Append-only writer for [`LogRecord`]s.
///
/// Opened once at startup and shared by reference with the components that
/// record outcomes. Each record is flushed as soon as it is written; the
/// underlying file is closed when the `RunLog` is dropped.
pub struct RunLog {
    sink: Mutex<Box<dyn Write + Send>>,
    path: Option<PathBuf>,
}

impl RunLog {
    /// Open (or create) the log file at `path` for appending.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(path = %parent.display(), "creating run log directory");
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path = %path.display(), "run log opened");

        Ok(Self {
            sink: Mutex::new(Box::new(file)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Like [`RunLog::open`], but an unwritable log (e.g. a root-owned file
    /// left by an earlier `sudo` run) degrades to [`RunLog::disabled`] so the
    /// privilege gate still gets to report its own error.
    pub fn open_or_disabled(path: &Path) -> Self {
        match Self::open(path) {
            Ok(log) => log,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "run log unavailable; records will not be kept");
                Self::disabled()
            }
        }
    }

    /// Log into an arbitrary writer (used by tests and embedding code).
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            path: None,
        }
    }

    /// A log that discards everything.
    pub fn disabled() -> Self {
        Self::from_writer(std::io::sink())
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(LogRecord::now(Severity::Info, message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.record(LogRecord::now(Severity::Warning, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(LogRecord::now(Severity::Error, message));
    }

    /// Append a record.
    ///
    /// A failing write never aborts the run; it is reported through
    /// `tracing` instead.
    pub fn record(&self, record: LogRecord) {
        let line = record.to_line();
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writeln!(sink, "{line}").and_then(|()| sink.flush()) {
            warn!(error = %e, "failed to write run log record");
        }
    }
}

impl fmt::Debug for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLog").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn fixed_record(message: &str) -> LogRecord {
        LogRecord {
            timestamp: Local.with_ymd_and_hms(2026, 10, 19, 8, 15, 2).unwrap(),
            severity: Severity::Error,
            message: message.to_string(),
        }
    }

    #[test]
    fn line_format_matches_layout() {
        let line = fixed_record("Command failed: apt update").to_line();
        assert_eq!(
            line,
            "2026-10-19 08:15:02,000 - ERROR - Command failed: apt update"
        );
    }

    #[test]
    fn multi_line_messages_are_folded() {
        let line = fixed_record("first\n\nsecond  \n").to_line();
        assert!(line.ends_with(" - ERROR - first | second"));
    }

    #[test]
    fn open_creates_parent_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("upkeep.log");

        {
            let log = RunLog::open(&path).unwrap();
            log.info("one");
        }
        {
            let log = RunLog::open(&path).unwrap();
            log.warning("two");
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - INFO - one"));
        assert!(lines[1].ends_with(" - WARNING - two"));
    }

    #[test]
    fn unopenable_log_falls_back_to_disabled() {
        let dir = tempfile::tempdir().unwrap();
        // The parent is a regular file, so the directory can never be created.
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let path = blocker.join("upkeep.log");

        assert!(RunLog::open(&path).is_err());
        let log = RunLog::open_or_disabled(&path);
        log.error("still accepted");
        assert!(!path.exists());
    }

    proptest! {
        #[test]
        fn every_record_is_one_line(message in "[a-zA-Z0-9 :\n]{0,80}") {
            let line = fixed_record(&message).to_line();
            prop_assert!(!line.contains('\n'));
            prop_assert!(line.starts_with("2026-10-19 08:15:02,000 - ERROR - "));
        }
    }
}
