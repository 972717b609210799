use async_trait::async_trait;

use crate::{
    cli::{
        Command, CommandResult,
        commands::utils::{arg, ensure_widget, parse_number},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to move a widget within its profile's list
///
/// Indices past the end move the widget last.
pub struct ReorderCommand {
    store: ProfileStore,
}

impl ReorderCommand {
    /// Creates a new ReorderCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for ReorderCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let profile = arg(args, 0, "profile")?;
        let uuid = arg(args, 1, "uuid")?;
        let index: usize = parse_number(arg(args, 2, "index")?, "index")?;

        ensure_widget(&self.store, profile, uuid)?;
        if !self.store.reorder_widget(profile, uuid, index) {
            return Ok(format!("Widget {uuid} is already at that position"));
        }
        Ok(format!("Moved widget {uuid} to position {index}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "reorder".to_string(),
            description: "Change a widget's position in the list".to_string(),
            category: "widget".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile holding the widget", ArgType::ProfileId),
                CommandArg::required("uuid", "Widget to move", ArgType::WidgetId),
                CommandArg::required("index", "New zero-based index", ArgType::Number),
            ],
            examples: vec!["desktop-widgets widget reorder default <uuid> 0".to_string()],
        }
    }
}
