//! Widget management commands.
mod add;
mod config;
mod list;
mod position;
mod remove;
mod reorder;

use std::sync::Arc;

pub use add::AddCommand;
pub use config::ConfigCommand;
pub use list::ListCommand;
pub use position::MoveCommand;
pub use remove::RemoveCommand;
pub use reorder::ReorderCommand;

use crate::{cli::CommandRegistry, plugins::PluginCatalog, profiles::ProfileStore};

/// Registers all widget-related commands with the command registry.
///
/// # Arguments
///
/// * `registry` - Mutable reference to the command registry
/// * `store` - Profile store the commands operate on
/// * `catalog` - Plugin catalog used to validate widget types
pub fn register_commands(
    registry: &mut CommandRegistry,
    store: &ProfileStore,
    catalog: &Arc<PluginCatalog>,
) {
    const CATEGORY_NAME: &str = "widget";

    registry.register_command(CATEGORY_NAME, Box::new(ListCommand::new(store.clone())));
    registry.register_command(
        CATEGORY_NAME,
        Box::new(AddCommand::new(store.clone(), catalog.clone())),
    );
    registry.register_command(CATEGORY_NAME, Box::new(RemoveCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(MoveCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ConfigCommand::new(store.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ReorderCommand::new(store.clone())));
}
