//! Unit tests for settings backends

#![allow(clippy::unwrap_used)]

use std::{fs, time::Duration};

use tempfile::TempDir;

use crate::settings::{FileSettings, MemorySettings, SettingsPort};

#[test]
fn memory_get_unset_key() {
    let settings = MemorySettings::new();

    assert_eq!(settings.get_string("profiles-json"), None);
}

#[test]
fn memory_set_then_get() {
    let settings = MemorySettings::new();

    settings.set_string("profiles-json", "{}").unwrap();

    assert_eq!(settings.get_string("profiles-json").as_deref(), Some("{}"));
}

#[test]
fn memory_set_announces_key() {
    let settings = MemorySettings::new();
    let mut changes = settings.subscribe_changes();

    settings.set_string("profiles-json", "{}").unwrap();

    assert_eq!(changes.try_recv().unwrap(), "profiles-json");
    assert!(changes.try_recv().is_err());
}

#[test]
fn memory_with_value() {
    let settings = MemorySettings::with_value("k", "v");

    assert_eq!(settings.get_string("k").as_deref(), Some("v"));
}

#[test]
fn file_settings_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let settings = FileSettings::open(dir.path().join("settings.json"));

    assert_eq!(settings.get_string("profiles-json"), None);
}

#[test]
fn file_settings_persist_across_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/settings.json");

    let settings = FileSettings::open(&path);
    settings.set_string("profiles-json", r#"{"a":1}"#).unwrap();
    drop(settings);

    let reopened = FileSettings::open(&path);
    assert_eq!(
        reopened.get_string("profiles-json").as_deref(),
        Some(r#"{"a":1}"#)
    );
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn file_settings_malformed_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "not json").unwrap();

    let settings = FileSettings::open(&path);

    assert_eq!(settings.get_string("profiles-json"), None);
}

#[test]
fn file_settings_reload_reports_changed_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let settings = FileSettings::open(&path);
    settings.set_string("a", "1").unwrap();
    settings.set_string("b", "2").unwrap();
    let mut changes = settings.subscribe_changes();

    fs::write(&path, r#"{"a":"1","b":"3","c":"4"}"#).unwrap();
    let changed = settings.reload();

    assert_eq!(changed, vec!["b".to_string(), "c".to_string()]);
    assert_eq!(changes.try_recv().unwrap(), "b");
    assert_eq!(changes.try_recv().unwrap(), "c");
    assert_eq!(settings.get_string("b").as_deref(), Some("3"));
}

#[test]
fn file_settings_reload_after_own_write_is_quiet() {
    let dir = TempDir::new().unwrap();
    let settings = FileSettings::open(dir.path().join("settings.json"));
    settings.set_string("a", "1").unwrap();

    assert!(settings.reload().is_empty());
}

#[test]
fn file_settings_reload_keeps_values_on_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let settings = FileSettings::open(&path);
    settings.set_string("a", "1").unwrap();

    fs::write(&path, "{ broken").unwrap();

    assert!(settings.reload().is_empty());
    assert_eq!(settings.get_string("a").as_deref(), Some("1"));
}

#[tokio::test]
async fn file_settings_watch_picks_up_external_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let settings = FileSettings::open(&path);
    settings.start_watching().unwrap();
    let mut changes = settings.subscribe_changes();

    let other = FileSettings::open(&path);
    other.set_string("profiles-json", "{}").unwrap();

    let key = tokio::time::timeout(Duration::from_secs(5), changes.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(key, "profiles-json");
    assert_eq!(settings.get_string("profiles-json").as_deref(), Some("{}"));
}
