use async_trait::async_trait;

use crate::{
    cli::{
        Command, CommandResult,
        commands::utils::arg,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to create a profile with the default grid
pub struct CreateCommand {
    store: ProfileStore,
}

impl CreateCommand {
    /// Creates a new CreateCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for CreateCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let name = arg(args, 0, "name")?;
        let id = self.store.create_profile(name);

        Ok(format!("Created profile '{name}' with id {id}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "create".to_string(),
            description: "Create a new profile".to_string(),
            category: "profile".to_string(),
            args: vec![CommandArg::required(
                "name",
                "Display name of the profile",
                ArgType::String,
            )],
            examples: vec!["desktop-widgets profile create \"Work\"".to_string()],
        }
    }
}
