use async_trait::async_trait;

use crate::{
    cli::{
        Command, CommandResult,
        commands::utils::{arg, ensure_widget},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to remove a widget from a profile
pub struct RemoveCommand {
    store: ProfileStore,
}

impl RemoveCommand {
    /// Creates a new RemoveCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for RemoveCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let profile = arg(args, 0, "profile")?;
        let uuid = arg(args, 1, "uuid")?;

        ensure_widget(&self.store, profile, uuid)?;
        self.store.remove_widget(profile, uuid);

        Ok(format!("Removed widget {uuid} from profile {profile}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "remove".to_string(),
            description: "Remove a widget from a profile".to_string(),
            category: "widget".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile holding the widget", ArgType::ProfileId),
                CommandArg::required("uuid", "Widget to remove", ArgType::WidgetId),
            ],
            examples: vec!["desktop-widgets widget remove default <uuid>".to_string()],
        }
    }
}
