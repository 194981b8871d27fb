// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] defines the immutable argument vector handed to the package
//!   manager.
//! - [`backend`] provides the `CommandBackend` trait and the production
//!   `ProcessBackend`, which spawns real processes with
//!   `tokio::process::Command`. Tests swap in a fake backend.
//! - [`runner`] wraps a backend with dry-run short-circuiting, run-log
//!   records and exit-status classification.

pub mod backend;
pub mod command;
pub mod runner;

pub use backend::{CommandBackend, ExecutionResult, ProcessBackend};
pub use command::PkgCommand;
pub use runner::CommandRunner;
