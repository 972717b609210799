use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    profiles::ProfileStore,
};

/// Command to list all profiles
///
/// Shows id, name, mode and widget count; the active profile is marked.
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
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let profiles = self.store.list_profiles();
        if profiles.is_empty() {
            return Ok("No profiles configured".to_string());
        }

        let mut output = format!("Found {} profile(s):\n\n", profiles.len());
        for profile in &profiles {
            let marker = if profile.is_active { "*" } else { " " };
            output.push_str(&format!(
                "{marker} {:<24} {:<24} {:>10} {:>3} widget(s)\n",
                profile.id, profile.name, profile.position_mode, profile.widget_count
            ));
        }

        output.push_str("\n* marks the active profile.");
        Ok(output)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List all profiles".to_string(),
            category: "profile".to_string(),
            args: vec![],
            examples: vec!["desktop-widgets profile list".to_string()],
        }
    }
}
