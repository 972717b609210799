//! Widget type discovery and lazy implementation loading.
//!
//! Each subdirectory of the plugin root is one widget type. Its optional
//! `plugin.json` names the type and may set a default anchor. The code
//! behind a type is resolved through a [`ModuleLoader`] the first time it
//! is needed and cached by the [`PluginCatalog`] from then on.

mod catalog;
mod error;
mod loader;
mod metadata;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde_json::{Map, Value};

pub use catalog::PluginCatalog;
pub use error::PluginError;
pub use loader::{BuiltinLoader, ModuleLoader, PluginRecord, install_builtin_plugins};
pub use metadata::{METADATA_FILE, PluginMetadata};

use crate::widgets::{SettingsPage, WidgetElement, WidgetError};

/// Creates elements of one widget type.
pub trait WidgetFactory: Send + Sync {
    /// Builds a detached, unstyled element from a widget's config.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError`] when the config cannot be used.
    fn create(&self, config: &Map<String, Value>) -> Result<Arc<dyn WidgetElement>, WidgetError>;
}

/// Describes the settings form of one widget type.
pub trait SettingsBuilder: Send + Sync {
    /// Form for a widget with `config`, current values filled in.
    fn build(&self, config: &Map<String, Value>) -> SettingsPage;
}
