use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::arg,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::{PositionMode, ProfileStore},
};

/// Command to switch a profile between grid and coordinate placement
///
/// Positions stored for the other mode are kept.
pub struct ModeCommand {
    store: ProfileStore,
}

impl ModeCommand {
    /// Creates a new ModeCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for ModeCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let id = arg(args, 0, "profile")?;
        let mode: PositionMode = arg(args, 1, "mode")?
            .parse()
            .map_err(CliError::InvalidArguments)?;

        if !self.store.set_position_mode(id, mode) {
            return Err(CliError::ProfileNotFound { id: id.to_string() });
        }
        Ok(format!("Profile {id} now uses {mode} positioning"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "mode".to_string(),
            description: "Set how widgets of a profile are placed".to_string(),
            category: "profile".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile to change", ArgType::ProfileId),
                CommandArg::required("mode", "grid or coordinate", ArgType::String),
            ],
            examples: vec![
                "desktop-widgets profile mode default coordinate".to_string(),
                "desktop-widgets profile mode default grid".to_string(),
            ],
        }
    }
}
