//! Unit tests for CLI module
//!
//! Registry validation and help rendering, output formatting, and every
//! command category run against an in-memory profile store.

#![allow(clippy::unwrap_used)]


use async_trait::async_trait;
use serde_json::json;

use crate::{
    cli::{
        ArgType, CliError, Command, CommandArg, CommandMetadata, CommandRegistry, CommandResult,
        formatting::{format_entry_position, format_json_value, format_point, format_size, format_usage},
    },
    layout::{Point, Size},
    profiles::{PositionMode, Profile, WidgetEntry},
};

struct EchoCommand {
    args: Vec<CommandArg>,
}

#[async_trait]
impl Command for EchoCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        Ok(args.join(" "))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "echo".to_string(),
            description: "Echo arguments".to_string(),
            category: "test".to_string(),
            args: self.args.clone(),
            examples: vec![],
        }
    }
}

fn registry_with(args: Vec<CommandArg>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register_command("test", Box::new(EchoCommand { args }));
    registry
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn registry_runs_command_within_bounds() {
    let registry = registry_with(vec![
        CommandArg::required("a", "first", ArgType::String),
        CommandArg::optional("b", "second", ArgType::String),
    ]);

    assert_eq!(registry.execute("test", "echo", &strings(&["x"])).await.unwrap(), "x");
    assert_eq!(
        registry.execute("test", "echo", &strings(&["x", "y"])).await.unwrap(),
        "x y"
    );
}

#[tokio::test]
async fn registry_rejects_wrong_argument_counts() {
    let registry = registry_with(vec![
        CommandArg::required("a", "first", ArgType::String),
        CommandArg::optional("b", "second", ArgType::String),
    ]);

    let missing = registry.execute("test", "echo", &[]).await;
    let extra = registry.execute("test", "echo", &strings(&["1", "2", "3"])).await;

    assert!(matches!(missing, Err(CliError::InvalidArguments(msg)) if msg.contains("at least 1")));
    assert!(matches!(extra, Err(CliError::InvalidArguments(msg)) if msg.contains("at most 2")));
}

#[tokio::test]
async fn repeated_last_argument_is_unbounded() {
    let registry = registry_with(vec![
        CommandArg::required("a", "first", ArgType::String),
        CommandArg::required("rest", "others", ArgType::KeyValue).repeated(),
    ]);

    let many = strings(&["a", "k=1", "k=2", "k=3", "k=4"]);
    assert_eq!(registry.execute("test", "echo", &many).await.unwrap(), many.join(" "));
    assert!(registry.execute("test", "echo", &strings(&["a"])).await.is_err());
}

#[tokio::test]
async fn unknown_category_or_command_is_not_found() {
    let registry = registry_with(vec![]);

    let category = registry.execute("nope", "echo", &[]).await;
    let command = registry.execute("test", "nope", &[]).await;

    assert!(matches!(category, Err(CliError::CommandNotFound(msg)) if msg.contains("'nope'")));
    assert!(matches!(command, Err(CliError::CommandNotFound(msg)) if msg.contains("'nope' in 'test'")));
}

#[test]
fn list_commands_is_sorted() {
    let mut registry = registry_with(vec![]);
    registry.register_command("alpha", Box::new(EchoCommand { args: vec![] }));

    let listed = registry.list_commands();

    assert_eq!(listed[0].0, "alpha");
    assert_eq!(listed[1].0, "test");
    assert_eq!(listed[1].1, vec!["echo".to_string()]);
}

#[test]
fn usage_marks_optional_and_repeated_arguments() {
    let metadata = CommandMetadata {
        name: "move".to_string(),
        description: String::new(),
        category: "widget".to_string(),
        args: vec![
            CommandArg::required("uuid", "", ArgType::WidgetId),
            CommandArg::optional("screen", "", ArgType::String),
            CommandArg::required("field", "", ArgType::KeyValue).repeated(),
        ],
        examples: vec![],
    };

    assert_eq!(format_usage(&metadata), "widget move <uuid> [screen] <field...>");
}

#[test]
fn json_values_format_on_one_line() {
    assert_eq!(format_json_value(&json!("hi")), "\"hi\"");
    assert_eq!(format_json_value(&json!(1.5)), "1.5");
    assert_eq!(format_json_value(&json!(true)), "true");
    assert_eq!(format_json_value(&json!(null)), "null");
    assert_eq!(format_json_value(&json!([1, 2, 3])), "[3]");
    assert_eq!(format_json_value(&json!({"a": 1, "b": 2})), "{2}");
}

#[test]
fn geometry_formatting() {
    assert_eq!(format_point(Point::new(10.0, 20.26)), "(10.0, 20.3)");
    assert_eq!(format_size(Size::new(199.6, 50.0)), "200x50");
}

#[test]
fn entry_position_follows_profile_mode() {
    let mut entry = WidgetEntry::new("customtext");
    entry.grid_col = Some(1.5);
    entry.x = Some(40.0);

    let mut profile = Profile::new("Test");
    assert_eq!(format_entry_position(&entry, &profile), "grid 1.5, -");

    profile.position_mode = Some(PositionMode::Coordinate);
    assert_eq!(format_entry_position(&entry, &profile), "at 40, -");
}
