use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Map;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::{arg, parse_json_object},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    plugins::PluginCatalog,
};

/// Command to print the settings form of a widget type as JSON
///
/// Field values are filled from the given config, or from the widget's
/// defaults when none is given.
pub struct SettingsCommand {
    catalog: Arc<PluginCatalog>,
}

impl SettingsCommand {
    /// Creates a new SettingsCommand
    pub fn new(catalog: Arc<PluginCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Command for SettingsCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let widget_type = arg(args, 0, "type")?;
        let config = match args.get(1) {
            Some(json) => parse_json_object(json, "config")?,
            None => Map::new(),
        };

        if !self.catalog.contains(widget_type) {
            return Err(CliError::PluginNotFound {
                widget_type: widget_type.to_string(),
            });
        }

        let Some(builder) = self.catalog.get_settings_builder(widget_type).await else {
            return Ok(format!("Widget type '{widget_type}' has no settings"));
        };

        serde_json::to_string_pretty(&builder.build(&config)).map_err(|e| {
            CliError::ServiceError {
                service: "plugin".to_string(),
                details: e.to_string(),
            }
        })
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "settings".to_string(),
            description: "Show the settings form of a widget type".to_string(),
            category: "plugin".to_string(),
            args: vec![
                CommandArg::required("type", "Widget type", ArgType::String),
                CommandArg::optional("config", "Widget config to fill the form", ArgType::Json),
            ],
            examples: vec![
                "desktop-widgets plugin settings datetime".to_string(),
                r#"desktop-widgets plugin settings customtext '{"text":"Hi"}'"#.to_string(),
            ],
        }
    }
}
