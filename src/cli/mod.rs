//! Command-line interface for managing widget profiles.
//!
//! Commands are grouped by category (`profile`, `widget`, `plugin`,
//! `canvas`, `config`) and generate their help text from metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};
