use async_trait::async_trait;

use crate::{
    cli::{
        Command, CommandResult,
        commands::utils::{arg, ensure_widget, parse_json_object},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to merge values into a widget's config
///
/// Top-level keys replace stored ones; a `style` object replaces the
/// whole style override.
pub struct ConfigCommand {
    store: ProfileStore,
}

impl ConfigCommand {
    /// Creates a new ConfigCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let profile = arg(args, 0, "profile")?;
        let uuid = arg(args, 1, "uuid")?;
        let partial = parse_json_object(arg(args, 2, "json")?, "json")?;

        ensure_widget(&self.store, profile, uuid)?;
        self.store.update_widget_config(profile, uuid, &partial);

        let keys: Vec<&str> = partial.keys().map(String::as_str).collect();
        Ok(format!("Updated {} of widget {uuid}", keys.join(", ")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "config".to_string(),
            description: "Merge values into a widget's config".to_string(),
            category: "widget".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile holding the widget", ArgType::ProfileId),
                CommandArg::required("uuid", "Widget to update", ArgType::WidgetId),
                CommandArg::required("json", "Object of config values", ArgType::Json),
            ],
            examples: vec![
                r#"desktop-widgets widget config default <uuid> '{"format":"HH:mm"}'"#.to_string(),
                r#"desktop-widgets widget config default <uuid> '{"style":{"fontSize":48}}'"#
                    .to_string(),
            ],
        }
    }
}
