use async_trait::async_trait;

use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Command to print the effective configuration as TOML
///
/// Shows defaults for everything the config file leaves out.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    /// Creates a new ShowCommand for the loaded configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for ShowCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        toml::to_string_pretty(&self.config)
            .map(|toml| toml.trim_end().to_string())
            .map_err(|e| CliError::ServiceError {
                service: "config".to_string(),
                details: e.to_string(),
            })
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "show".to_string(),
            description: "Print the effective configuration".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["desktop-widgets config show".to_string()],
        }
    }
}
