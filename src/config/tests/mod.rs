//! Unit tests for config module
//!
//! Tests configuration types, defaults, and serialization.

#![allow(clippy::unwrap_used)]

use crate::config::{CanvasConfig, Config, LogLevel};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.canvas, CanvasConfig::default());
    assert!(config.storage.settings_file.is_none());
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[canvas]"));
}

#[test]
fn config_deserialize_partial_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [canvas]
        screen_width = 2560
    "#;

    let config = Config::parse(toml_str, None).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.canvas.screen_width, 2560);
    assert_eq!(config.canvas.screen_height, 1080);
}

#[test]
fn config_empty_string_is_default() {
    let config = Config::parse("", None).unwrap();

    assert_eq!(config.canvas.screen_width, 1920);
    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn config_rejects_wrong_types() {
    let result = Config::parse("[canvas]\nscreen_width = \"wide\"\n", None);

    assert!(result.is_err());
}

#[test]
fn config_reports_toml_syntax_errors() {
    let err = Config::parse("[general", None).unwrap_err();

    assert!(err.to_string().contains("failed to parse TOML at 'string'"));
}

#[test]
fn log_level_display_matches_serde_names() {
    for level in [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        let serialized = serde_json::to_string(&level).unwrap();
        assert_eq!(serialized, format!("\"{level}\""));
    }
}

#[test]
fn screen_size_from_canvas() {
    let canvas = CanvasConfig {
        screen_width: 1200,
        screen_height: 800,
        plugin_dir: None,
    };

    let size = canvas.screen_size();
    assert_eq!(size.width, 1200.0);
    assert_eq!(size.height, 800.0);
}

#[test]
fn schema_names_sections() {
    let schema = serde_json::to_string(&Config::schema()).unwrap();

    assert!(schema.contains("general"));
    assert!(schema.contains("canvas"));
    assert!(schema.contains("storage"));
}

#[test]
fn load_from_creates_default_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested/config.toml");

    let config = Config::load_from(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.canvas.screen_width, 1920);
}
