//! Canvas commands.
mod preview;

use std::sync::Arc;

pub use preview::PreviewCommand;

use crate::{
    cli::CommandRegistry, layout::Size, plugins::PluginCatalog, profiles::ProfileStore,
};

/// Registers all canvas-related commands with the command registry.
///
/// # Arguments
///
/// * `registry` - Mutable reference to the command registry
/// * `store` - Profile store to render from
/// * `catalog` - Plugins providing the widgets
/// * `screen` - Default screen size for previews
pub fn register_commands(
    registry: &mut CommandRegistry,
    store: &ProfileStore,
    catalog: &Arc<PluginCatalog>,
    screen: Size,
) {
    const CATEGORY_NAME: &str = "canvas";

    registry.register_command(
        CATEGORY_NAME,
        Box::new(PreviewCommand::new(store.clone(), catalog.clone(), screen)),
    );
}
