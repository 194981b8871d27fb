// tests/config_loading.rs

mod common;
use crate::common::builders::ConfigFileBuilder;

use std::io::Write;
use tempfile::NamedTempFile;
use upkeep::config::load_and_validate;
use upkeep::errors::UpkeepError;
use upkeep::types::OutputStyle;

#[test]
fn full_config_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[config]
package_manager = "apt-get"
log_file = "/var/log/upkeep.log"
spinner_ms = 0
style = "plain"
show_output = false
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.package_manager, "apt-get");
    assert_eq!(cfg.config.log_file.to_str(), Some("/var/log/upkeep.log"));
    assert!(cfg.spinner_duration().is_zero());
    assert_eq!(cfg.config.style, OutputStyle::Plain);
    assert!(!cfg.config.show_output);
}

#[test]
fn empty_package_manager_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[config]
package_manager = ""
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(UpkeepError::ConfigError(msg)) => assert!(msg.contains("package_manager")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn bad_style_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[config]
style = "sparkly"
"#
    )
    .unwrap();

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, UpkeepError::TomlError(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn builder_produces_quiet_defaults() {
    let cfg = ConfigFileBuilder::new().package_manager("nala").build();
    assert_eq!(cfg.config.package_manager, "nala");
    assert!(cfg.spinner_duration().is_zero());
    assert_eq!(cfg.config.style, OutputStyle::Plain);
}
