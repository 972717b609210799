use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Map;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::{arg, find_profile, parse_json_object},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    plugins::PluginCatalog,
    profiles::{ProfileStore, WidgetEntry},
};

/// Command to add a widget to a profile
///
/// New widgets start at the grid center (grid mode) or without
/// coordinates (coordinate mode).
pub struct AddCommand {
    store: ProfileStore,
    catalog: Arc<PluginCatalog>,
}

impl AddCommand {
    /// Creates a new AddCommand
    pub fn new(store: ProfileStore, catalog: Arc<PluginCatalog>) -> Self {
        Self { store, catalog }
    }
}

#[async_trait]
impl Command for AddCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let profile = arg(args, 0, "profile")?;
        let widget_type = arg(args, 1, "type")?;
        let config = match args.get(2) {
            Some(json) => parse_json_object(json, "config")?,
            None => Map::new(),
        };

        find_profile(&self.store, profile)?;
        if !self.catalog.contains(widget_type) {
            return Err(CliError::PluginNotFound {
                widget_type: widget_type.to_string(),
            });
        }

        let uuid = self
            .store
            .add_widget(profile, WidgetEntry::new(widget_type).with_config(config))
            .ok_or_else(|| CliError::ProfileNotFound {
                id: profile.to_string(),
            })?;

        Ok(format!("Added {widget_type} widget {uuid} to profile {profile}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "add".to_string(),
            description: "Add a widget to a profile".to_string(),
            category: "widget".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile to add to", ArgType::ProfileId),
                CommandArg::required("type", "Widget type (see 'plugin list')", ArgType::String),
                CommandArg::optional("config", "Initial widget config", ArgType::Json),
            ],
            examples: vec![
                "desktop-widgets widget add default datetime".to_string(),
                r#"desktop-widgets widget add default customtext '{"text":"Hi"}'"#.to_string(),
            ],
        }
    }
}
