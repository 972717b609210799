use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use super::{METADATA_FILE, PluginError, PluginMetadata, SettingsBuilder, WidgetFactory};
use crate::widgets::{
    CustomTextFactory, CustomTextSettings, DateTimeFactory, DateTimeSettings,
    customtext::CUSTOMTEXT_TYPE, datetime::DATETIME_TYPE,
};

/// A discovered plugin directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRecord {
    /// Parsed or fallback metadata.
    pub metadata: PluginMetadata,
    /// Directory the plugin lives in.
    pub dir: PathBuf,
}

/// Resolves the code behind a plugin.
///
/// `Ok(None)` means the plugin ships no such module; errors are reserved
/// for modules that exist but cannot be loaded.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Loads the widget factory of `record`.
    ///
    /// # Errors
    /// Returns error if the module is present but unusable
    async fn load_widget(
        &self,
        record: &PluginRecord,
    ) -> Result<Option<Arc<dyn WidgetFactory>>, PluginError>;

    /// Loads the settings builder of `record`.
    ///
    /// # Errors
    /// Returns error if the module is present but unusable
    async fn load_settings(
        &self,
        record: &PluginRecord,
    ) -> Result<Option<Arc<dyn SettingsBuilder>>, PluginError>;
}

#[derive(Debug, Clone, Copy)]
enum Module {
    Widget,
    Settings,
}

impl Module {
    fn name(self) -> &'static str {
        match self {
            Module::Widget => "widget",
            Module::Settings => "settings",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Marker {
    #[serde(default)]
    implementation: Option<String>,
}

/// Loader backed by the implementations compiled into the crate.
///
/// A plugin directory opts into a module by carrying its marker file:
/// `widget.toml` / `settings.toml`, or the legacy `widget.js` /
/// `settings.js`. A TOML marker may name the implementation to use with
/// `implementation = "<id>"`; otherwise the plugin id is looked up.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLoader;

impl BuiltinLoader {
    /// Implementation id to use for `module`, or `None` when the plugin has
    /// no marker for it.
    async fn implementation(
        &self,
        record: &PluginRecord,
        module: Module,
    ) -> Result<Option<String>, PluginError> {
        let load_failed = |details: String| PluginError::LoadFailed {
            id: record.metadata.id.clone(),
            module: module.name(),
            details,
        };

        let toml_marker = record.dir.join(format!("{}.toml", module.name()));
        match tokio::fs::read_to_string(&toml_marker).await {
            Ok(contents) => {
                let marker: Marker =
                    toml::from_str(&contents).map_err(|e| load_failed(e.to_string()))?;
                return Ok(Some(
                    marker
                        .implementation
                        .filter(|id| !id.trim().is_empty())
                        .unwrap_or_else(|| record.metadata.id.clone()),
                ));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(load_failed(e.to_string())),
        }

        let js_marker = record.dir.join(format!("{}.js", module.name()));
        match tokio::fs::try_exists(&js_marker).await {
            Ok(true) => Ok(Some(record.metadata.id.clone())),
            Ok(false) => Ok(None),
            Err(e) => Err(load_failed(e.to_string())),
        }
    }
}

#[async_trait]
impl ModuleLoader for BuiltinLoader {
    #[instrument(skip(self, record), fields(plugin = %record.metadata.id))]
    async fn load_widget(
        &self,
        record: &PluginRecord,
    ) -> Result<Option<Arc<dyn WidgetFactory>>, PluginError> {
        let Some(implementation) = self.implementation(record, Module::Widget).await? else {
            debug!("plugin has no widget module");
            return Ok(None);
        };

        let factory: Arc<dyn WidgetFactory> = match implementation.as_str() {
            CUSTOMTEXT_TYPE => Arc::new(CustomTextFactory),
            DATETIME_TYPE => Arc::new(DateTimeFactory),
            _ => return Err(PluginError::UnknownImplementation { id: implementation }),
        };
        Ok(Some(factory))
    }

    #[instrument(skip(self, record), fields(plugin = %record.metadata.id))]
    async fn load_settings(
        &self,
        record: &PluginRecord,
    ) -> Result<Option<Arc<dyn SettingsBuilder>>, PluginError> {
        let Some(implementation) = self.implementation(record, Module::Settings).await? else {
            debug!("plugin has no settings module");
            return Ok(None);
        };

        let builder: Arc<dyn SettingsBuilder> = match implementation.as_str() {
            CUSTOMTEXT_TYPE => Arc::new(CustomTextSettings),
            DATETIME_TYPE => Arc::new(DateTimeSettings),
            _ => return Err(PluginError::UnknownImplementation { id: implementation }),
        };
        Ok(Some(builder))
    }
}

const BUILTIN_PLUGINS: [(&str, &str); 2] =
    [(CUSTOMTEXT_TYPE, "Custom Text"), (DATETIME_TYPE, "Date & Time")];

/// Writes the directories of the built-in plugins under `root`.
///
/// Existing files are left untouched, so user edits to a built-in
/// `plugin.json` survive.
///
/// # Errors
/// Returns error if a directory or file cannot be created
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn install_builtin_plugins(root: &Path) -> Result<(), PluginError> {
    for (id, name) in BUILTIN_PLUGINS {
        let dir = root.join(id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PluginError::InstallFailed {
                path: dir.clone(),
                details: e.to_string(),
            })?;

        let metadata = PluginMetadata {
            id: id.to_string(),
            name: name.to_string(),
            anchor: None,
        };
        let json =
            serde_json::to_string_pretty(&metadata).map_err(|e| PluginError::InstallFailed {
                path: dir.join(METADATA_FILE),
                details: e.to_string(),
            })?;

        let marker = format!("implementation = \"{id}\"\n");
        write_new(&dir.join(METADATA_FILE), &json).await?;
        write_new(&dir.join("widget.toml"), &marker).await?;
        write_new(&dir.join("settings.toml"), &marker).await?;
    }

    info!("built-in plugins installed");
    Ok(())
}

async fn write_new(path: &Path, contents: &str) -> Result<(), PluginError> {
    let install_failed = |e: std::io::Error| PluginError::InstallFailed {
        path: path.to_path_buf(),
        details: e.to_string(),
    };

    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => return Err(install_failed(e)),
    };

    file.write_all(contents.as_bytes())
        .await
        .map_err(install_failed)?;
    file.flush().await.map_err(install_failed)
}
