use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::arg,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to rename a profile
pub struct RenameCommand {
    store: ProfileStore,
}

impl RenameCommand {
    /// Creates a new RenameCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for RenameCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let id = arg(args, 0, "profile")?;
        let name = arg(args, 1, "name")?;

        if !self.store.rename_profile(id, name) {
            return Err(CliError::ProfileNotFound { id: id.to_string() });
        }
        Ok(format!("Renamed profile {id} to '{name}'"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "rename".to_string(),
            description: "Rename a profile".to_string(),
            category: "profile".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile to rename", ArgType::ProfileId),
                CommandArg::required("name", "New display name", ArgType::String),
            ],
            examples: vec!["desktop-widgets profile rename default \"Home\"".to_string()],
        }
    }
}
