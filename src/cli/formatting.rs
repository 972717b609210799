//! Formatting utilities for CLI output.
//!
//! Styled headers and messages plus compact renderings of widget
//! configuration values and positions.

use serde_json::Value;

use super::types::CommandMetadata;
use crate::{
    layout::{Point, Size},
    profiles::{PositionMode, Profile, WidgetEntry},
};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats subheaders with styling
pub fn format_subheader(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::YELLOW, text, Colors::RESET)
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats category names with styling
pub fn format_category(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::BLUE, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Usage line of a command, e.g. `widget move <profile> <uuid> <field...>`.
pub fn format_usage(metadata: &CommandMetadata) -> String {
    let mut usage = format!("{} {}", metadata.category, metadata.name);
    for arg in &metadata.args {
        let dots = if arg.repeated { "..." } else { "" };
        if arg.required {
            usage.push_str(&format!(" <{}{dots}>", arg.name));
        } else {
            usage.push_str(&format!(" [{}{dots}]", arg.name));
        }
    }
    usage
}

/// Formats a JSON value for one-line display.
///
/// Scalars are shown in full; arrays and objects show their size.
pub fn format_json_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => format!("[{}]", arr.len()),
        Value::Object(map) => format!("{{{}}}", map.len()),
    }
}

/// `(x, y)` rounded to one decimal.
pub fn format_point(point: Point) -> String {
    format!("({:.1}, {:.1})", point.x, point.y)
}

/// `WxH` rounded to whole pixels.
pub fn format_size(size: Size) -> String {
    format!("{:.0}x{:.0}", size.width, size.height)
}

/// Stored position of a widget in its profile's mode; unset fields show
/// as `-`.
pub fn format_entry_position(entry: &WidgetEntry, profile: &Profile) -> String {
    let show = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());

    match profile.mode() {
        PositionMode::Grid => {
            format!("grid {}, {}", show(entry.grid_col), show(entry.grid_row))
        }
        PositionMode::Coordinate => format!("at {}, {}", show(entry.x), show(entry.y)),
    }
}
