use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::find_profile,
        formatting::{format_entry_position, format_json_value},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to list the widgets of a profile
///
/// Lists the active profile when no profile is given.
pub struct ListCommand {
    store: ProfileStore,
}

impl ListCommand {
    /// Creates a new ListCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let id = match args.first() {
            Some(id) => id.clone(),
            None => self
                .store
                .active_profile_id()
                .ok_or_else(|| CliError::InvalidArguments("No active profile".to_string()))?,
        };
        let profile = find_profile(&self.store, &id)?;

        if profile.widgets().is_empty() {
            return Ok(format!("Profile '{}' has no widgets", profile.name));
        }

        let mut output = format!(
            "Profile '{}' ({} mode, {}x{} grid), {} widget(s):\n\n",
            profile.name,
            profile.mode(),
            profile.columns(),
            profile.rows(),
            profile.widgets().len()
        );

        for (index, entry) in profile.widgets().iter().enumerate() {
            let anchor = entry
                .anchor
                .as_ref()
                .map_or_else(|| "default".to_string(), ToString::to_string);
            let config: Vec<String> = entry
                .config
                .iter()
                .map(|(key, value)| format!("{key}={}", format_json_value(value)))
                .collect();

            output.push_str(&format!(
                "{index:2}. {} {:<12} {:<20} anchor {anchor}\n",
                entry.uuid,
                entry.widget_type,
                format_entry_position(entry, &profile),
            ));
            if !config.is_empty() {
                output.push_str(&format!("    {}\n", config.join(" ")));
            }
        }

        Ok(output.trim_end().to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List the widgets of a profile".to_string(),
            category: "widget".to_string(),
            args: vec![CommandArg::optional(
                "profile",
                "Profile to list (default: active profile)",
                ArgType::ProfileId,
            )],
            examples: vec![
                "desktop-widgets widget list".to_string(),
                "desktop-widgets widget list default".to_string(),
            ],
        }
    }
}
