use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    plugins::PluginCatalog,
};

/// Command to list the discovered widget types
pub struct ListCommand {
    catalog: Arc<PluginCatalog>,
}

impl ListCommand {
    /// Creates a new ListCommand
    pub fn new(catalog: Arc<PluginCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let plugins = self.catalog.list_types();

        if plugins.is_empty() {
            return Ok(format!(
                "No plugins found in {}",
                self.catalog.root().display()
            ));
        }

        let mut output = format!("Plugins in {}:\n\n", self.catalog.root().display());
        for plugin in plugins {
            let anchor = plugin
                .anchor
                .map_or_else(|| "center".to_string(), |anchor| anchor.to_string());
            output.push_str(&format!(
                "  {:<16} {:<24} anchor {anchor}\n",
                plugin.id, plugin.name
            ));
        }

        Ok(output.trim_end().to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List available widget types".to_string(),
            category: "plugin".to_string(),
            args: vec![],
            examples: vec!["desktop-widgets plugin list".to_string()],
        }
    }
}
