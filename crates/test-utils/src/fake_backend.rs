use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use upkeep::exec::{CommandBackend, ExecutionResult, PkgCommand};
use upkeep::privilege::PrivilegeProbe;

/// Scripted response for a command line.
#[derive(Debug, Clone)]
enum Scripted {
    Exit { code: i32, stdout: String, stderr: String },
    NotFound,
}

/// A fake backend that:
/// - records every command line it was asked to execute
/// - answers with a scripted result, or exit 0 with empty output by default.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    executed: Arc<Mutex<Vec<String>>>,
    script: HashMap<String, Scripted>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command_line` (e.g. `"apt upgrade -y"`) exit with `code`.
    pub fn exit_with(mut self, command_line: &str, code: i32, stderr: &str) -> Self {
        self.script.insert(
            command_line.to_string(),
            Scripted::Exit {
                code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Make `command_line` succeed with the given stdout.
    pub fn stdout(mut self, command_line: &str, stdout: &str) -> Self {
        self.script.insert(
            command_line.to_string(),
            Scripted::Exit {
                code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Make `command_line` fail to spawn.
    pub fn not_found(mut self, command_line: &str) -> Self {
        self.script.insert(command_line.to_string(), Scripted::NotFound);
        self
    }

    /// Shared handle to the list of executed command lines.
    pub fn executed(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.executed)
    }
}

impl CommandBackend for FakeBackend {
    fn execute<'a>(
        &'a mut self,
        command: &'a PkgCommand,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<ExecutionResult>> + Send + 'a>> {
        let line = command.to_string();
        self.executed.lock().unwrap().push(line.clone());
        let scripted = self.script.get(&line).cloned();

        Box::pin(async move {
            match scripted {
                None => Ok(ExecutionResult {
                    success: true,
                    code: Some(0),
                    stdout: String::new(),
                    stderr: String::new(),
                }),
                Some(Scripted::Exit { code, stdout, stderr }) => Ok(ExecutionResult {
                    success: code == 0,
                    code: Some(code),
                    stdout,
                    stderr,
                }),
                Some(Scripted::NotFound) => Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", command.program()),
                )),
            }
        })
    }
}

/// Privilege check with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticPrivilege(pub bool);

impl PrivilegeProbe for StaticPrivilege {
    fn is_privileged(&self) -> bool {
        self.0
    }
}
