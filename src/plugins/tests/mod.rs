//! Unit tests for plugin discovery and loading

#![allow(clippy::unwrap_used)]

use std::{
    fs,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Map;
use tempfile::TempDir;

use super::{
    METADATA_FILE, ModuleLoader, PluginCatalog, PluginError, PluginMetadata, PluginRecord,
    SettingsBuilder, WidgetFactory, install_builtin_plugins,
};
use crate::{
    layout::{Anchor, AnchorSpec},
    widgets::CustomTextFactory,
};

fn plugin_dir(root: &Path, name: &str, metadata: Option<&str>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    if let Some(json) = metadata {
        fs::write(dir.join(METADATA_FILE), json).unwrap();
    }
}

/// Loader that counts calls and takes a while to answer.
#[derive(Default)]
struct CountingLoader {
    widget_loads: AtomicUsize,
    settings_loads: AtomicUsize,
}

#[async_trait]
impl ModuleLoader for CountingLoader {
    async fn load_widget(
        &self,
        _record: &PluginRecord,
    ) -> Result<Option<Arc<dyn WidgetFactory>>, PluginError> {
        self.widget_loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(Some(Arc::new(CustomTextFactory)))
    }

    async fn load_settings(
        &self,
        _record: &PluginRecord,
    ) -> Result<Option<Arc<dyn SettingsBuilder>>, PluginError> {
        self.settings_loads.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

/// Loader whose first widget load fails.
#[derive(Default)]
struct FlakyLoader {
    attempts: AtomicUsize,
}

#[async_trait]
impl ModuleLoader for FlakyLoader {
    async fn load_widget(
        &self,
        record: &PluginRecord,
    ) -> Result<Option<Arc<dyn WidgetFactory>>, PluginError> {
        if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(PluginError::LoadFailed {
                id: record.metadata.id.clone(),
                module: "widget",
                details: "transient".to_string(),
            });
        }
        Ok(Some(Arc::new(CustomTextFactory)))
    }

    async fn load_settings(
        &self,
        _record: &PluginRecord,
    ) -> Result<Option<Arc<dyn SettingsBuilder>>, PluginError> {
        Ok(None)
    }
}

mod metadata {
    use super::*;

    #[test]
    fn parse_reads_all_fields() {
        let metadata =
            PluginMetadata::parse(r#"{"id":"clock","name":"Clock","anchor":"top-left"}"#, "dir")
                .unwrap();

        assert_eq!(metadata.id, "clock");
        assert_eq!(metadata.name, "Clock");
        assert_eq!(metadata.anchor.unwrap().resolve(), Anchor::named("top-left").unwrap());
    }

    #[test]
    fn parse_defaults_missing_fields_to_directory_name() {
        let metadata = PluginMetadata::parse(r#"{"id":"","anchor":""}"#, "weather").unwrap();

        assert_eq!(metadata, PluginMetadata::fallback("weather"));
    }

    #[test]
    fn parse_accepts_coordinate_anchor() {
        let metadata =
            PluginMetadata::parse(r#"{"id":"a","name":"A","anchor":{"x":0,"y":1}}"#, "a").unwrap();

        assert!(matches!(metadata.anchor, Some(AnchorSpec::Point { .. })));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(PluginMetadata::parse("{not json", "x").is_err());
    }
}

mod discovery {
    use super::*;

    #[tokio::test]
    async fn missing_root_yields_empty_catalog() {
        let temp = TempDir::new().unwrap();
        let catalog = PluginCatalog::builtin(temp.path().join("absent"));

        assert_eq!(catalog.discover().await.unwrap(), 0);
        assert!(catalog.list_types().is_empty());
    }

    #[tokio::test]
    async fn directories_become_plugins_sorted_by_id() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "zeta", Some(r#"{"id":"zeta","name":"Zeta"}"#));
        plugin_dir(temp.path(), "alpha", None);
        fs::write(temp.path().join("README"), "not a plugin").unwrap();

        let catalog = PluginCatalog::builtin(temp.path());
        assert_eq!(catalog.discover().await.unwrap(), 2);

        let ids: Vec<String> = catalog.list_types().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
        assert_eq!(catalog.get_metadata("zeta").unwrap().name, "Zeta");
        assert!(!catalog.contains("README"));
    }

    #[tokio::test]
    async fn invalid_metadata_falls_back_to_directory_name() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "broken", Some("{ oops"));

        let catalog = PluginCatalog::builtin(temp.path());
        catalog.discover().await.unwrap();

        assert_eq!(
            catalog.get_metadata("broken").unwrap(),
            PluginMetadata::fallback("broken")
        );
    }

    #[tokio::test]
    async fn duplicate_ids_keep_first_directory() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "a", Some(r#"{"id":"same","name":"First"}"#));
        plugin_dir(temp.path(), "b", Some(r#"{"id":"same","name":"Second"}"#));

        let catalog = PluginCatalog::builtin(temp.path());
        assert_eq!(catalog.discover().await.unwrap(), 1);
        assert_eq!(catalog.get_metadata("same").unwrap().name, "First");
    }

    #[tokio::test]
    async fn rediscovery_replaces_known_plugins() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "old", None);

        let catalog = PluginCatalog::builtin(temp.path());
        catalog.discover().await.unwrap();
        fs::remove_dir(temp.path().join("old")).unwrap();
        plugin_dir(temp.path(), "new", None);
        catalog.discover().await.unwrap();

        assert!(!catalog.contains("old"));
        assert!(catalog.contains("new"));
    }
}

mod loading {
    use super::*;

    #[tokio::test]
    async fn builtin_plugins_load_after_install() {
        let temp = TempDir::new().unwrap();
        install_builtin_plugins(temp.path()).await.unwrap();

        let catalog = PluginCatalog::builtin(temp.path());
        catalog.discover().await.unwrap();

        let names: Vec<String> = catalog.list_types().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Custom Text", "Date & Time"]);

        let factory = catalog.get_factory("customtext").await.unwrap();
        let element = factory.create(&Map::new()).unwrap();
        assert_eq!(element.text(), "Hello, World!");

        assert!(catalog.get_settings_builder("datetime").await.is_some());
    }

    #[tokio::test]
    async fn install_keeps_existing_files() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "customtext", Some(r#"{"id":"customtext","name":"Mine"}"#));

        install_builtin_plugins(temp.path()).await.unwrap();

        let catalog = PluginCatalog::builtin(temp.path());
        catalog.discover().await.unwrap();
        assert_eq!(catalog.get_metadata("customtext").unwrap().name, "Mine");
        assert!(catalog.get_factory("customtext").await.is_some());
    }

    #[tokio::test]
    async fn legacy_script_marker_is_accepted() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "datetime", None);
        fs::write(temp.path().join("datetime/widget.js"), "").unwrap();

        let catalog = PluginCatalog::builtin(temp.path());
        catalog.discover().await.unwrap();

        assert!(catalog.get_factory("datetime").await.is_some());
        assert!(catalog.get_settings_builder("datetime").await.is_none());
    }

    #[tokio::test]
    async fn marker_may_name_another_implementation() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "banner", Some(r#"{"id":"banner","name":"Banner"}"#));
        fs::write(
            temp.path().join("banner/widget.toml"),
            "implementation = \"customtext\"\n",
        )
        .unwrap();

        let catalog = PluginCatalog::builtin(temp.path());
        catalog.discover().await.unwrap();

        assert!(catalog.get_factory("banner").await.is_some());
    }

    #[tokio::test]
    async fn unknown_type_and_missing_module_yield_none() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "empty", None);
        plugin_dir(temp.path(), "mystery", None);
        fs::write(temp.path().join("mystery/widget.toml"), "").unwrap();

        let catalog = PluginCatalog::builtin(temp.path());
        catalog.discover().await.unwrap();

        assert!(catalog.get_factory("nope").await.is_none());
        assert!(catalog.get_factory("empty").await.is_none());
        assert!(catalog.get_factory("mystery").await.is_none());
    }

    #[tokio::test]
    async fn concurrent_first_requests_share_one_load() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "text", None);

        let loader = Arc::new(CountingLoader::default());
        let catalog = PluginCatalog::new(temp.path(), loader.clone());
        catalog.discover().await.unwrap();

        let factories = join_all((0..5).map(|_| catalog.get_factory("text"))).await;

        assert!(factories.iter().all(Option::is_some));
        assert_eq!(loader.widget_loads.load(Ordering::SeqCst), 1);

        catalog.get_factory("text").await.unwrap();
        assert_eq!(loader.widget_loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn settings_cache_is_independent_and_caches_absence() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "text", None);

        let loader = Arc::new(CountingLoader::default());
        let catalog = PluginCatalog::new(temp.path(), loader.clone());
        catalog.discover().await.unwrap();

        assert!(catalog.get_settings_builder("text").await.is_none());
        assert!(catalog.get_settings_builder("text").await.is_none());

        assert_eq!(loader.settings_loads.load(Ordering::SeqCst), 1);
        assert_eq!(loader.widget_loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let temp = TempDir::new().unwrap();
        plugin_dir(temp.path(), "text", None);

        let loader = Arc::new(FlakyLoader::default());
        let catalog = PluginCatalog::new(temp.path(), loader.clone());
        catalog.discover().await.unwrap();

        assert!(catalog.get_factory("text").await.is_none());
        assert!(catalog.get_factory("text").await.is_some());
        assert_eq!(loader.attempts.load(Ordering::SeqCst), 2);
    }
}
