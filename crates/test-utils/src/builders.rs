use upkeep::config::{ConfigFile, ConfigSection, RawConfigFile};
use upkeep::types::OutputStyle;

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the defaults with the spinner disabled and plain output.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection {
                    spinner_ms: 0,
                    style: OutputStyle::Plain,
                    ..ConfigSection::default()
                },
            },
        }
    }

    pub fn package_manager(mut self, pm: &str) -> Self {
        self.config.config.package_manager = pm.to_string();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
