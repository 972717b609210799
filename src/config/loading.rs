use std::{fs, path::Path};

use tracing::{debug, info, instrument};

use super::{Config, ConfigPaths};
use crate::{Result, WidgetsError};

const DEFAULT_CONFIG: &str = "\
# Desktop widgets configuration file
#
# [general]
# log_level = \"info\"
#
# [canvas]
# screen_width = 1920
# screen_height = 1080
# plugin_dir = \"/path/to/plugins\"
#
# [storage]
# settings_file = \"/path/to/settings.json\"
";

impl Config {
    /// Loads the configuration file at `path`, creating a commented
    /// default file first when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or read, or if the
    /// TOML content does not match the configuration schema.
    #[instrument]
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            create_default_config_file(path)?;
        }

        let content = fs::read_to_string(path).map_err(|e| WidgetsError::io_at(e, path))?;
        let config = Self::parse(&content, Some(path))?;

        debug!(?config, "configuration parsed");
        Ok(config)
    }

    /// Loads `config.toml` from the standard configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or loading fails.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        info!("Loading configuration from {}", path.display());
        Self::load_from(&path)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `WidgetsError::TomlParseError` on malformed TOML and
    /// `WidgetsError::ConfigValidation` when values have the wrong shape.
    pub fn parse(content: &str, origin: Option<&Path>) -> Result<Config> {
        let value: toml::Value =
            toml::from_str(content).map_err(|e| WidgetsError::toml_parse(e, origin))?;

        value
            .try_into()
            .map_err(|e: toml::de::Error| WidgetsError::ConfigValidation {
                component: "config parsing".to_string(),
                details: e.to_string(),
            })
    }
}

fn create_default_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| WidgetsError::io_at(e, parent))?;
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| WidgetsError::io_at(e, path))?;
    info!("Created default configuration at {}", path.display());

    Ok(())
}
