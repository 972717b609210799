//! Plugin inspection commands.
mod list;
mod settings;

use std::sync::Arc;

pub use list::ListCommand;
pub use settings::SettingsCommand;

use crate::{cli::CommandRegistry, plugins::PluginCatalog};

/// Registers all plugin-related commands with the command registry.
///
/// # Arguments
///
/// * `registry` - Mutable reference to the command registry
/// * `catalog` - Discovered plugins
pub fn register_commands(registry: &mut CommandRegistry, catalog: &Arc<PluginCatalog>) {
    const CATEGORY_NAME: &str = "plugin";

    registry.register_command(CATEGORY_NAME, Box::new(ListCommand::new(catalog.clone())));
    registry.register_command(
        CATEGORY_NAME,
        Box::new(SettingsCommand::new(catalog.clone())),
    );
}
