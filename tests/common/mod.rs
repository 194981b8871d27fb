#![allow(dead_code)]

use upkeep::engine::{Orchestrator, OrchestratorOptions};
use upkeep::exec::CommandRunner;
use upkeep::privilege::PrivilegeGuard;
use upkeep::report::Reporter;
use upkeep::runlog::RunLog;
use upkeep::types::RunMode;

pub use upkeep_test_utils::builders;
pub use upkeep_test_utils::{init_tracing, log_lines, FakeBackend, StaticPrivilege};

/// Orchestrator wired to a fake backend, fixed privilege and plain output.
pub fn orchestrator<'a>(
    backend: FakeBackend,
    privileged: bool,
    mode: RunMode,
    log: &'a RunLog,
) -> Orchestrator<'a, FakeBackend, StaticPrivilege> {
    orchestrator_with(
        backend,
        privileged,
        mode,
        log,
        Reporter::plain(),
        OrchestratorOptions::default(),
    )
}

/// Same as [`orchestrator`], with the reporter and options chosen by the test.
pub fn orchestrator_with<'a>(
    backend: FakeBackend,
    privileged: bool,
    mode: RunMode,
    log: &'a RunLog,
    reporter: Reporter,
    options: OrchestratorOptions,
) -> Orchestrator<'a, FakeBackend, StaticPrivilege> {
    let runner = CommandRunner::new(backend, mode, reporter.clone(), log);
    let guard = PrivilegeGuard::new(StaticPrivilege(privileged), "upkeep");
    Orchestrator::new(runner, guard, reporter, options)
}
