// src/privilege.rs

//! Root privilege gate.
//!
//! Package-manager maintenance needs an effective UID of 0. The check runs
//! once, before the first command; failing it is fatal.

use tracing::debug;

use crate::errors::{Result, UpkeepError};
use crate::runlog::RunLog;

/// Yes/no answer to "may this process run privileged commands?".
pub trait PrivilegeProbe {
    fn is_privileged(&self) -> bool;
}

/// Production check: effective UID is root.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectiveUid;

impl PrivilegeProbe for EffectiveUid {
    fn is_privileged(&self) -> bool {
        let euid = nix::unistd::geteuid();
        debug!(euid = euid.as_raw(), "checked effective uid");
        euid.is_root()
    }
}

/// Gate that refuses to continue without privilege.
pub struct PrivilegeGuard<P> {
    probe: P,
    /// Program name used in the "re-run with sudo" hint.
    program: String,
}

impl<P: PrivilegeProbe> PrivilegeGuard<P> {
    pub fn new(probe: P, program: impl Into<String>) -> Self {
        Self {
            probe,
            program: program.into(),
        }
    }

    /// Return `Ok(())` when privileged.
    ///
    /// Otherwise writes one ERROR record and returns
    /// [`UpkeepError::Privilege`], which maps to exit code 1.
    pub fn ensure(&self, log: &RunLog) -> Result<()> {
        if self.probe.is_privileged() {
            return Ok(());
        }

        debug!("insufficient privilege");
        log.error("Insufficient privileges: this program must be run as root");
        Err(UpkeepError::Privilege {
            program: self.program.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(bool);

    impl PrivilegeProbe for Fixed {
        fn is_privileged(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn privileged_passes_without_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upkeep.log");
        let log = RunLog::open(&path).unwrap();

        PrivilegeGuard::new(Fixed(true), "upkeep").ensure(&log).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn unprivileged_fails_with_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upkeep.log");
        let log = RunLog::open(&path).unwrap();

        let err = PrivilegeGuard::new(Fixed(false), "upkeep")
            .ensure(&log)
            .unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("sudo upkeep"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains(" - ERROR - "));
    }
}
