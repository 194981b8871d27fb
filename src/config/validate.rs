// src/config/validate.rs

use crate::config::model::{ConfigFile, ConfigSection, RawConfigFile};
use crate::errors::{Result, UpkeepError};

/// Upper bound for the cosmetic spinner, so a typo cannot stall every step.
pub const MAX_SPINNER_MS: u64 = 10_000;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::UpkeepError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_section(&raw.config)?;
        Ok(ConfigFile::new_unchecked(raw.config))
    }
}

/// Validate an already-built section, e.g. after CLI overrides were applied.
pub fn validate_section(cfg: &ConfigSection) -> Result<()> {
    validate_package_manager(&cfg.package_manager)?;

    if cfg.log_file.as_os_str().is_empty() {
        return Err(UpkeepError::ConfigError(
            "[config].log_file must not be empty".to_string(),
        ));
    }

    if cfg.spinner_ms > MAX_SPINNER_MS {
        return Err(UpkeepError::ConfigError(format!(
            "[config].spinner_ms must be <= {MAX_SPINNER_MS} (got {})",
            cfg.spinner_ms
        )));
    }

    Ok(())
}

fn validate_package_manager(pm: &str) -> Result<()> {
    if pm.trim().is_empty() {
        return Err(UpkeepError::ConfigError(
            "[config].package_manager must not be empty".to_string(),
        ));
    }
    // A single program name or path; arguments are fixed per step.
    if pm.chars().any(char::is_whitespace) {
        return Err(UpkeepError::ConfigError(format!(
            "[config].package_manager must be a single program, got '{pm}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(toml_src: &str) -> RawConfigFile {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = ConfigFile::try_from(raw("")).unwrap();
        assert_eq!(cfg.config.package_manager, "apt");
        assert_eq!(cfg.config.log_file.to_str(), Some("upkeep.log"));
        assert!(cfg.config.show_output);
    }

    #[test]
    fn package_manager_with_arguments_is_rejected() {
        let err = ConfigFile::try_from(raw(
            r#"
[config]
package_manager = "apt -q"
"#,
        ))
        .unwrap_err();
        assert!(matches!(err, UpkeepError::ConfigError(msg) if msg.contains("single program")));
    }

    #[test]
    fn oversized_spinner_is_rejected() {
        let err = ConfigFile::try_from(raw(
            r#"
[config]
spinner_ms = 60000
"#,
        ))
        .unwrap_err();
        assert!(matches!(err, UpkeepError::ConfigError(_)));
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        let parsed: std::result::Result<RawConfigFile, _> = toml::from_str(
            r#"
[config]
pakage_manager = "apt"
"#,
        );
        assert!(parsed.is_err());
    }
}
