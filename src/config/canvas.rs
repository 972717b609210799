use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::Size;

/// Geometry of the surface widgets are laid out on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width of the desktop area in pixels.
    pub screen_width: u32,

    /// Height of the desktop area in pixels.
    pub screen_height: u32,

    /// Directory scanned for plugins. Defaults to `<data dir>/plugins`.
    pub plugin_dir: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            plugin_dir: None,
        }
    }
}

impl CanvasConfig {
    /// Screen size as layout dimensions.
    pub fn screen_size(&self) -> Size {
        Size::new(f64::from(self.screen_width), f64::from(self.screen_height))
    }
}
