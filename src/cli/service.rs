use std::sync::Arc;

use super::{
    CliError, CommandRegistry, commands,
    formatting::{
        format_category, format_command, format_description, format_header, format_subheader,
        format_usage,
    },
    types::CommandMetadata,
};
use crate::{config::Config, plugins::PluginCatalog, profiles::ProfileStore};

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, help
/// and execution. Commands are organized by category.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// # Arguments
    /// * `config` - Effective configuration; supplies the preview screen size
    /// * `store` - Profile store shared by profile, widget and canvas commands
    /// * `catalog` - Discovered plugins
    pub fn new(config: &Config, store: ProfileStore, catalog: Arc<PluginCatalog>) -> Self {
        let mut registry = CommandRegistry::new();

        commands::profile::register_commands(&mut registry, &store);
        commands::widget::register_commands(&mut registry, &store, &catalog);
        commands::plugin::register_commands(&mut registry, &catalog);
        commands::canvas::register_commands(
            &mut registry,
            &store,
            &catalog,
            config.canvas.screen_size(),
        );
        commands::config::register_commands(&mut registry, config);

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// An empty or `help` category renders the command overview; `help`
    /// followed by a category (and optionally a command) renders its help.
    /// A category without a command name also renders that category's help.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist in the category.
    /// Other errors come from the command itself.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        match (category, command_name) {
            ("" | "help" | "--help" | "-h", "") => Ok(self.overview()),
            ("help", topic) => match args.first() {
                Some(name) => self.command_help(topic, name),
                None => self.category_help(topic),
            },
            (category, "" | "help" | "--help" | "-h") => self.category_help(category),
            (category, name) => self.registry.execute(category, name, args).await,
        }
    }

    /// Lists all available commands organized by category.
    ///
    /// # Returns
    /// Vector of (category_name, command_names) tuples
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    fn overview(&self) -> String {
        let mut output = format!(
            "{}\n\n{}\n  desktop-widgets <category> <command> [args...]\n  desktop-widgets help <category> [command]\n\n{}\n",
            format_header("desktop-widgets"),
            format_subheader("Usage:"),
            format_subheader("Commands:"),
        );

        for (category, names) in self.list_all() {
            output.push_str(&format!("  {}\n", format_category(&category)));
            for name in names {
                let description = self
                    .registry
                    .metadata(&category, &name)
                    .map(|metadata| metadata.description)
                    .unwrap_or_default();
                output.push_str(&format!(
                    "    {:<10} {}\n",
                    format_command(&name),
                    format_description(&description)
                ));
            }
        }

        output.trim_end().to_string()
    }

    fn category_help(&self, category: &str) -> Result<String, CliError> {
        let commands = self.registry.category_metadata(category)?;

        let mut output = format!("{}\n\n", format_header(&format!("{category} commands")));
        for metadata in &commands {
            output.push_str(&format!(
                "  {}\n      {}\n",
                format_command(&format_usage(metadata)),
                format_description(&metadata.description)
            ));
        }

        Ok(output.trim_end().to_string())
    }

    fn command_help(&self, category: &str, name: &str) -> Result<String, CliError> {
        let metadata = self.registry.metadata(category, name)?;
        Ok(render_command_help(&metadata))
    }
}

fn render_command_help(metadata: &CommandMetadata) -> String {
    let mut output = format!(
        "{}\n{}\n\n{}\n  desktop-widgets {}\n",
        format_header(&format!("{} {}", metadata.category, metadata.name)),
        format_description(&metadata.description),
        format_subheader("Usage:"),
        format_usage(metadata),
    );

    if !metadata.args.is_empty() {
        output.push_str(&format!("\n{}\n", format_subheader("Arguments:")));
        for arg in &metadata.args {
            let required = if arg.required { "required" } else { "optional" };
            output.push_str(&format!(
                "  {:<10} {} {}\n",
                arg.name,
                arg.description,
                format_description(&format!("({}, {required})", arg.value_type.hint()))
            ));
        }
    }

    if !metadata.examples.is_empty() {
        output.push_str(&format!("\n{}\n", format_subheader("Examples:")));
        for example in &metadata.examples {
            output.push_str(&format!("  {example}\n"));
        }
    }

    output.trim_end().to_string()
}
