use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the profile settings blob is stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Settings file path. Defaults to `<data dir>/settings.json`.
    pub settings_file: Option<PathBuf>,
}
