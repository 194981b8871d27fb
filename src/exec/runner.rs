// src/exec/runner.rs

//! Command runner: dry-run short-circuit, run-log records and failure
//! classification on top of a [`CommandBackend`].

use tracing::{debug, info};

use crate::errors::{Result, UpkeepError};
use crate::exec::backend::CommandBackend;
use crate::exec::command::PkgCommand;
use crate::report::Reporter;
use crate::runlog::RunLog;
use crate::types::{RunMode, StatusKind};

/// Exit code reported for a process that was killed by a signal.
const SIGNALLED_EXIT_CODE: i32 = 1;

/// Runs commands through a backend for one orchestration.
///
/// The run mode is fixed at construction, so a single runner can never mix
/// dry-run and live invocations.
pub struct CommandRunner<'a, B> {
    backend: B,
    mode: RunMode,
    reporter: Reporter,
    log: &'a RunLog,
}

impl<'a, B: CommandBackend> CommandRunner<'a, B> {
    pub fn new(backend: B, mode: RunMode, reporter: Reporter, log: &'a RunLog) -> Self {
        Self {
            backend,
            mode,
            reporter,
            log,
        }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn log(&self) -> &'a RunLog {
        self.log
    }

    /// Run `command`.
    ///
    /// - Dry run: prints a notice and returns `Ok(None)` without touching the
    ///   backend or the run log.
    /// - Live, exit 0: one INFO record, returns the captured stdout verbatim.
    /// - Live, non-zero exit or spawn failure: one ERROR record with the
    ///   command and its stderr, then an error carrying the exit code.
    pub async fn run(&mut self, command: &PkgCommand) -> Result<Option<String>> {
        if self.mode.is_dry_run() {
            self.reporter
                .status(StatusKind::Info, &format!("would run: {command}"));
            return Ok(None);
        }

        info!(command = %command, "running command");

        let result = match self.backend.execute(command).await {
            Ok(result) => result,
            Err(source) => {
                debug!(command = %command, error = %source, "failed to launch command");
                self.log
                    .error(format!("Command could not be started: {command}: {source}"));
                return Err(UpkeepError::Spawn {
                    command: command.to_string(),
                    source,
                });
            }
        };

        if result.success {
            self.log.info(format!("Command succeeded: {command}"));
            return Ok(Some(result.stdout));
        }

        let code = result.code.unwrap_or(SIGNALLED_EXIT_CODE);
        debug!(command = %command, exit_code = code, "command failed");
        self.log.error(format!(
            "Command failed: {command} (exit code {code}): {}",
            result.stderr.trim()
        ));

        Err(UpkeepError::CommandFailed {
            command: command.to_string(),
            code,
            stderr: result.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ProcessBackend;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps everything in memory so tests can inspect the log.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[tokio::test]
    async fn success_returns_stdout_and_logs_once() {
        let buf = SharedBuf::default();
        let log = RunLog::from_writer(buf.clone());
        let mut runner =
            CommandRunner::new(ProcessBackend::new(), RunMode::Live, Reporter::plain(), &log);

        let out = runner
            .run(&PkgCommand::new("printf", ["a\\n  b "]))
            .await
            .unwrap();

        assert_eq!(out.as_deref(), Some("a\n  b "));
        let lines = buf.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(" - INFO - Command succeeded: printf"));
    }

    #[tokio::test]
    async fn failure_carries_exit_code_and_stderr() {
        let buf = SharedBuf::default();
        let log = RunLog::from_writer(buf.clone());
        let mut runner =
            CommandRunner::new(ProcessBackend::new(), RunMode::Live, Reporter::plain(), &log);

        let err = runner
            .run(&PkgCommand::new("sh", ["-c", "echo 'E: lock held' >&2; exit 100"]))
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 100);
        assert_eq!(err.command_stderr(), Some("E: lock held"));
        let lines = buf.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(" - ERROR - "));
        assert!(lines[0].contains("E: lock held"));
    }

    #[tokio::test]
    async fn spawn_failure_is_fatal_and_logged() {
        let buf = SharedBuf::default();
        let log = RunLog::from_writer(buf.clone());
        let mut runner =
            CommandRunner::new(ProcessBackend::new(), RunMode::Live, Reporter::plain(), &log);

        let err = runner
            .run(&PkgCommand::new("nonexistent_command_12345", ["update"]))
            .await
            .unwrap_err();

        assert!(matches!(err, UpkeepError::Spawn { .. }));
        assert_eq!(err.exit_code(), 127);
        assert_eq!(buf.lines().len(), 1);
    }

    #[tokio::test]
    async fn dry_run_spawns_nothing_and_logs_nothing() {
        let buf = SharedBuf::default();
        let log = RunLog::from_writer(buf.clone());
        let mut runner =
            CommandRunner::new(ProcessBackend::new(), RunMode::DryRun, Reporter::plain(), &log);

        // Would fail if it were actually spawned.
        let out = runner
            .run(&PkgCommand::new("nonexistent_command_12345", ["update"]))
            .await
            .unwrap();

        assert_eq!(out, None);
        assert!(buf.lines().is_empty());
    }
}
