use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::arg,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to switch the profile shown on the desktop
pub struct ActivateCommand {
    store: ProfileStore,
}

impl ActivateCommand {
    /// Creates a new ActivateCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for ActivateCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let id = arg(args, 0, "profile")?;

        if !self.store.set_active_profile(id) {
            return Err(CliError::ProfileNotFound { id: id.to_string() });
        }
        Ok(format!("Active profile is now {id}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "activate".to_string(),
            description: "Make a profile the active one".to_string(),
            category: "profile".to_string(),
            args: vec![CommandArg::required(
                "profile",
                "Profile to activate",
                ArgType::ProfileId,
            )],
            examples: vec!["desktop-widgets profile activate default".to_string()],
        }
    }
}
