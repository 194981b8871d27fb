// src/engine/orchestrator.rs

use std::time::Instant;

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{CommandBackend, CommandRunner};
use crate::privilege::{PrivilegeGuard, PrivilegeProbe};
use crate::report::Reporter;
use crate::types::StatusKind;

use super::{Stage, Step, StepOutcome};

/// Settings the orchestrator needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    pub package_manager: String,
    /// Echo each successful command's stdout.
    pub show_output: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            package_manager: "apt".to_string(),
            show_output: true,
        }
    }
}

/// Drives the privilege gate and the four steps in order.
pub struct Orchestrator<'a, B, P> {
    runner: CommandRunner<'a, B>,
    guard: PrivilegeGuard<P>,
    reporter: Reporter,
    options: OrchestratorOptions,
    stage: Stage,
}

impl<'a, B: CommandBackend, P: PrivilegeProbe> Orchestrator<'a, B, P> {
    pub fn new(
        runner: CommandRunner<'a, B>,
        guard: PrivilegeGuard<P>,
        reporter: Reporter,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            runner,
            guard,
            reporter,
            options,
            stage: Stage::NotStarted,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the whole sequence once.
    ///
    /// Returns the per-step outcomes on success. The first error (privilege
    /// or command) is returned as-is and stops the sequence.
    pub async fn run(&mut self) -> Result<Vec<StepOutcome>> {
        debug_assert_eq!(self.stage, Stage::NotStarted, "orchestrator runs once");
        let started = Instant::now();
        let mode = self.runner.mode();

        self.guard.ensure(self.runner.log())?;
        self.advance(Stage::PrivilegeChecked);

        self.reporter.plan(&Step::ALL, &self.options.package_manager, mode);

        let mut outcomes = Vec::with_capacity(Step::ALL.len());
        for step in Step::ALL {
            outcomes.push(self.run_step(step).await?);
        }

        self.advance(Stage::Summarized);
        self.reporter.summary(&outcomes, mode, started.elapsed());

        self.advance(Stage::Done);
        info!(steps = outcomes.len(), dry_run = mode.is_dry_run(), "upgrade sequence finished");
        Ok(outcomes)
    }

    async fn run_step(&mut self, step: Step) -> Result<StepOutcome> {
        self.advance(step.stage());
        let command = step.command(&self.options.package_manager);

        self.reporter.header(step.title());
        self.reporter
            .spinner(step.progress_message(), self.reporter.spinner_hint())
            .await;

        let outcome = match self.runner.run(&command).await? {
            Some(stdout) => {
                if self.options.show_output {
                    self.reporter.output(&stdout);
                }
                self.reporter
                    .status(StatusKind::Success, &format!("{} finished", step.title()));
                StepOutcome::Completed(step, stdout)
            }
            None => StepOutcome::Simulated(step),
        };

        Ok(outcome)
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = ?self.stage, to = ?next, "stage transition");
        self.stage = next;
    }
}
