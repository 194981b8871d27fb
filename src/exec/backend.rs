// src/exec/backend.rs

//! Pluggable command backend.
//!
//! The runner talks to a `CommandBackend` instead of spawning processes
//! directly, so tests can record invocations and script exit codes without
//! touching the system package manager.

use std::future::Future;
use std::pin::Pin;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

use super::command::PkgCommand;

/// Captured outcome of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Trait abstracting how a command is executed.
///
/// An `Err` means the process could not be started (or waited on) at all; a
/// process that ran and failed is an `Ok` with `success == false`.
pub trait CommandBackend: Send {
    fn execute<'a>(
        &'a mut self,
        command: &'a PkgCommand,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<ExecutionResult>> + Send + 'a>>;
}

/// Production backend: spawns the program directly (no shell) and waits for
/// it, capturing stdout and stderr.
#[derive(Debug, Clone, Default)]
pub struct ProcessBackend;

impl ProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CommandBackend for ProcessBackend {
    fn execute<'a>(
        &'a mut self,
        command: &'a PkgCommand,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<ExecutionResult>> + Send + 'a>> {
        Box::pin(async move {
            debug!(program = %command.program(), args = ?command.args(), "spawning process");

            let mut cmd = Command::new(command.program());
            cmd.args(command.args())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let output = cmd.output().await?;

            let result = ExecutionResult::from_output(output);
            debug!(
                command = %command,
                success = result.success,
                exit_code = ?result.code,
                "process exited"
            );
            Ok(result)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout() {
        let cmd = PkgCommand::new("echo", ["hello", "world"]);
        let result = ProcessBackend::new().execute(&cmd).await.unwrap();
        assert!(result.success);
        assert_eq!(result.code, Some(0));
        assert_eq!(result.stdout, "hello world\n");
    }

    #[tokio::test]
    async fn captures_stderr_and_code() {
        let cmd = PkgCommand::new("sh", ["-c", "echo oops >&2; exit 3"]);
        let result = ProcessBackend::new().execute(&cmd).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.code, Some(3));
        assert_eq!(result.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn missing_program_is_an_io_error() {
        let cmd = PkgCommand::new("nonexistent_command_12345", ["update"]);
        let err = ProcessBackend::new().execute(&cmd).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
