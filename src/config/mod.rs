//! Application configuration.
//!
//! Host-level settings for the desktop widgets runtime: logging, the
//! canvas the widgets are laid out on, and where profile data and
//! plugins live. Loaded from `config.toml`; every field has a default so
//! a missing or partial file is never an error.
//!
//! Widget profiles are not part of this file. They live in the settings
//! store managed by [`crate::profiles::ProfileStore`].

mod canvas;
mod general;
mod loading;
mod paths;
mod storage;

#[cfg(test)]
mod tests;

pub use canvas::CanvasConfig;
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use storage::StorageConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Canvas geometry and plugin location.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Profile storage location.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// JSON schema describing `config.toml`.
    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
