use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::arg,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to delete a profile
///
/// Deleting the active profile activates the first remaining one.
pub struct DeleteCommand {
    store: ProfileStore,
}

impl DeleteCommand {
    /// Creates a new DeleteCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for DeleteCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let id = arg(args, 0, "profile")?;

        if !self.store.delete_profile(id) {
            return Err(CliError::ProfileNotFound { id: id.to_string() });
        }

        let active = self
            .store
            .active_profile_id()
            .unwrap_or_else(|| "none".to_string());
        Ok(format!("Deleted profile {id} (active profile: {active})"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "delete".to_string(),
            description: "Delete a profile and its widgets".to_string(),
            category: "profile".to_string(),
            args: vec![CommandArg::required(
                "profile",
                "Profile to delete",
                ArgType::ProfileId,
            )],
            examples: vec!["desktop-widgets profile delete 3f2b9c1e-6d4a-4c2e-9a51-0f7e8d2c4b16".to_string()],
        }
    }
}
