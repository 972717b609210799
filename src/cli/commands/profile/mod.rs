//! Profile management commands.
mod activate;
mod create;
mod delete;
mod grid;
mod list;
mod mode;
mod rename;

pub use activate::ActivateCommand;
pub use create::CreateCommand;
pub use delete::DeleteCommand;
pub use grid::GridCommand;
pub use list::ListCommand;
pub use mode::ModeCommand;
pub use rename::RenameCommand;

use crate::{cli::CommandRegistry, profiles::ProfileStore};

/// Registers all profile-related commands with the command registry.
///
/// # Arguments
///
/// * `registry` - Mutable reference to the command registry
/// * `store` - Profile store the commands operate on
pub fn register_commands(registry: &mut CommandRegistry, store: &ProfileStore) {
    const CATEGORY_NAME: &str = "profile";

    registry.register_command(CATEGORY_NAME, Box::new(ListCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(CreateCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(RenameCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(DeleteCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ActivateCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ModeCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(GridCommand::new(store.clone())));
}
