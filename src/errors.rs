// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use thiserror::Error;

/// Exit status used when the process lacks root privileges.
pub const EXIT_PRIVILEGE: i32 = 1;

/// Exit status used when the package manager could not be spawned at all.
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// Exit status for configuration / startup problems.
pub const EXIT_CONFIG: i32 = 2;

#[derive(Error, Debug)]
pub enum UpkeepError {
    #[error("this command must be run as root (try: sudo {program})")]
    Privilege { program: String },

    #[error("`{command}` failed with exit code {code}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UpkeepError {
    /// Process exit status the top-level handler should use for this error.
    ///
    /// A failed package-manager command passes its own exit code through
    /// verbatim.
    pub fn exit_code(&self) -> i32 {
        match self {
            UpkeepError::Privilege { .. } => EXIT_PRIVILEGE,
            UpkeepError::CommandFailed { code, .. } => *code,
            UpkeepError::Spawn { .. } => EXIT_SPAWN_FAILED,
            UpkeepError::ConfigError(_)
            | UpkeepError::IoError(_)
            | UpkeepError::TomlError(_)
            | UpkeepError::Other(_) => EXIT_CONFIG,
        }
    }

    /// Captured stderr of a failed command, trimmed; `None` for other errors
    /// or when the command wrote nothing to stderr.
    pub fn command_stderr(&self) -> Option<&str> {
        match self {
            UpkeepError::CommandFailed { stderr, .. } => {
                let trimmed = stderr.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, UpkeepError>;
