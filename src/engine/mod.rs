// src/engine/mod.rs

//! Upgrade orchestration.
//!
//! A fixed, linear sequence: privilege gate, plan, then four package-manager
//! steps, then a summary. The stage machine is:
//!
//! ```text
//! NotStarted -> PrivilegeChecked -> Updating -> Upgrading -> Removing
//!            -> Cleaning -> Summarized -> Done
//! ```
//!
//! A failing step returns its error immediately; the orchestrator is left in
//! that step's stage and nothing after it runs.

use crate::exec::PkgCommand;

pub mod orchestrator;

pub use orchestrator::{Orchestrator, OrchestratorOptions};

/// Where the orchestrator currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NotStarted,
    PrivilegeChecked,
    Updating,
    Upgrading,
    Removing,
    Cleaning,
    Summarized,
    Done,
}

/// One of the four package-manager operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Update,
    Upgrade,
    Autoremove,
    Autoclean,
}

impl Step {
    /// Every step, in execution order.
    pub const ALL: [Step; 4] = [Step::Update, Step::Upgrade, Step::Autoremove, Step::Autoclean];

    pub fn title(self) -> &'static str {
        match self {
            Step::Update => "Update package index",
            Step::Upgrade => "Upgrade installed packages",
            Step::Autoremove => "Remove orphaned packages",
            Step::Autoclean => "Clean package cache",
        }
    }

    /// Line shown next to the spinner before the step runs.
    pub fn progress_message(self) -> &'static str {
        match self {
            Step::Update => "Refreshing package lists...",
            Step::Upgrade => "Upgrading packages...",
            Step::Autoremove => "Removing packages that are no longer needed...",
            Step::Autoclean => "Cleaning the package cache...",
        }
    }

    pub fn args(self) -> &'static [&'static str] {
        match self {
            Step::Update => &["update"],
            Step::Upgrade => &["upgrade", "-y"],
            Step::Autoremove => &["autoremove", "-y"],
            Step::Autoclean => &["autoclean"],
        }
    }

    pub fn command(self, package_manager: &str) -> PkgCommand {
        PkgCommand::new(package_manager, self.args())
    }

    /// Stage the orchestrator is in while this step runs.
    pub fn stage(self) -> Stage {
        match self {
            Step::Update => Stage::Updating,
            Step::Upgrade => Stage::Upgrading,
            Step::Autoremove => Stage::Removing,
            Step::Autoclean => Stage::Cleaning,
        }
    }
}

/// Result of one step that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Ran for real; holds the captured stdout.
    Completed(Step, String),
    /// Dry run: nothing was executed.
    Simulated(Step),
}

impl StepOutcome {
    pub fn step(&self) -> Step {
        match self {
            StepOutcome::Completed(step, _) | StepOutcome::Simulated(step) => *step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_build_fixed_argument_vectors() {
        let argvs: Vec<String> = Step::ALL
            .iter()
            .map(|step| step.command("apt").to_string())
            .collect();
        assert_eq!(
            argvs,
            vec![
                "apt update",
                "apt upgrade -y",
                "apt autoremove -y",
                "apt autoclean"
            ]
        );
    }

    #[test]
    fn package_manager_is_substituted() {
        assert_eq!(Step::Upgrade.command("apt-get").to_string(), "apt-get upgrade -y");
    }

    #[test]
    fn step_stages_follow_order() {
        let stages: Vec<Stage> = Step::ALL.iter().map(|s| s.stage()).collect();
        assert_eq!(
            stages,
            vec![Stage::Updating, Stage::Upgrading, Stage::Removing, Stage::Cleaning]
        );
    }
}
