use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::PluginError;
use crate::layout::AnchorSpec;

/// File holding a plugin's metadata.
pub const METADATA_FILE: &str = "plugin.json";

/// Identity of a widget type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Type id referenced by widget entries.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Anchor used when a widget entry sets none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorSpec>,
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    anchor: Option<AnchorSpec>,
}

impl PluginMetadata {
    /// Metadata of a plugin directory without a usable `plugin.json`.
    pub fn fallback(dir_name: &str) -> Self {
        Self {
            id: dir_name.to_string(),
            name: dir_name.to_string(),
            anchor: None,
        }
    }

    /// Parses `plugin.json` contents. Missing or empty `id` and `name`
    /// default to the directory name and a blank anchor counts as none.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed JSON.
    pub fn parse(json: &str, dir_name: &str) -> Result<Self, serde_json::Error> {
        let raw: RawMetadata = serde_json::from_str(json)?;
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Ok(Self {
            id: non_empty(raw.id).unwrap_or_else(|| dir_name.to_string()),
            name: non_empty(raw.name).unwrap_or_else(|| dir_name.to_string()),
            anchor: raw.anchor.filter(|anchor| !anchor.is_blank()),
        })
    }
}

/// Reads the metadata of the plugin in `dir`, degrading to
/// [`PluginMetadata::fallback`] when the file is absent or invalid.
pub(crate) async fn read_metadata(dir: &Path, dir_name: &str) -> PluginMetadata {
    let path = dir.join(METADATA_FILE);

    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return PluginMetadata::fallback(dir_name);
        }
        Err(e) => {
            let error = PluginError::InvalidMetadata {
                path,
                details: e.to_string(),
            };
            warn!(%error, "using directory name as plugin id");
            return PluginMetadata::fallback(dir_name);
        }
    };

    PluginMetadata::parse(&contents, dir_name).unwrap_or_else(|e| {
        let error = PluginError::InvalidMetadata {
            path,
            details: e.to_string(),
        };
        warn!(%error, "using directory name as plugin id");
        PluginMetadata::fallback(dir_name)
    })
}
