// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::OutputStyle;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// package_manager = "apt"
/// log_file = "upkeep.log"
/// spinner_ms = 1200
/// style = "rich"
/// show_output = true
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,
}

/// Validated configuration. Build it through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection) -> Self {
        Self { config }
    }

    pub fn spinner_duration(&self) -> Duration {
        Duration::from_millis(self.config.spinner_ms)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(ConfigSection::default())
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Program invoked for every step (`<pm> update`, `<pm> upgrade -y`, ...).
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    /// Append-only run log, relative to the working directory unless absolute.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// How long the spinner animates before each step, in milliseconds.
    /// `0` disables it.
    #[serde(default = "default_spinner_ms")]
    pub spinner_ms: u64,

    #[serde(default)]
    pub style: OutputStyle,

    /// Echo the captured stdout of each successful command.
    #[serde(default = "default_show_output")]
    pub show_output: bool,
}

fn default_package_manager() -> String {
    "apt".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("upkeep.log")
}

fn default_spinner_ms() -> u64 {
    1200
}

fn default_show_output() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            package_manager: default_package_manager(),
            log_file: default_log_file(),
            spinner_ms: default_spinner_ms(),
            style: OutputStyle::default(),
            show_output: default_show_output(),
        }
    }
}
