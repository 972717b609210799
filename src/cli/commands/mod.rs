/// Canvas preview commands
pub mod canvas;
/// Configuration inspection commands
pub mod config;
/// Plugin inspection commands
pub mod plugin;
/// Profile management commands
pub mod profile;
/// Widget management commands
pub mod widget;

mod utils;
