//! Config file and increment resolution tests.

use std::fs::{self, File};

use tempfile::TempDir;

use dctl::config::{Settings, DEFAULT_INCREMENT};
use dctl::error::DctlError;
use dctl::tool::locate;

#[test]
fn increments_fall_back_when_missing_or_non_numeric() {
    let settings = Settings {
        brightness_increment: Some("plenty".to_string()),
        contrast_increment: None,
        ..Default::default()
    };
    assert!((settings.brightness_increment() - DEFAULT_INCREMENT).abs() < f64::EPSILON);
    assert!((settings.contrast_increment() - DEFAULT_INCREMENT).abs() < f64::EPSILON);
}

#[test]
fn config_file_feeds_the_locator() {
    let temp = TempDir::new().unwrap();
    let tool = temp.path().join("display-tool");
    File::create(&tool).unwrap();

    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        format!("tool = \"{}\"\ncontrast-increment = \"0.1\"\n", tool.display()),
    )
    .unwrap();

    let settings = Settings::load_from(&config).unwrap();
    assert!((settings.contrast_increment() - 0.1).abs() < f64::EPSILON);
    assert_eq!(locate(None, &settings).unwrap(), tool);
}

#[test]
fn explicit_tool_overrides_config() {
    let temp = TempDir::new().unwrap();
    let configured = temp.path().join("configured");
    let explicit = temp.path().join("explicit");
    File::create(&configured).unwrap();
    File::create(&explicit).unwrap();

    let settings = Settings {
        tool: Some(configured),
        ..Default::default()
    };
    assert_eq!(locate(Some(&explicit), &settings).unwrap(), explicit);
}

#[test]
fn broken_config_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "tool = ???").unwrap();

    let err = Settings::load_from(&config).unwrap_err();
    assert!(matches!(err, DctlError::ConfigParse(_)));
}
