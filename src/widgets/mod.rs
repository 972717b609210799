//! Built-in widgets and the element contract they implement.
//!
//! Two widget types ship with the crate: `customtext` shows a fixed string
//! and `datetime` shows a clock. Both produce a [`TextElement`]. Each also
//! has a settings builder describing its form as a [`SettingsPage`].

pub mod customtext;
pub mod datetime;
mod element;
mod error;
pub mod settings;
pub mod text;

#[cfg(test)]
mod tests;

use serde_json::{Map, Value};

pub use customtext::{CustomTextFactory, CustomTextSettings};
pub use datetime::{DateTimeFactory, DateTimeSettings};
pub use element::{ElementCss, TextElement};
pub use error::WidgetError;
pub use settings::{SettingsField, SettingsGroup, SettingsPage};

use crate::{
    common::Property,
    layout::{Point, Size},
    style::Style,
};

/// A visual element created by a widget factory.
///
/// Elements are created detached and unplaced. The canvas styles them,
/// attaches them to a surface and moves them once the surface has
/// measured them. All methods take `&self`; implementations synchronise
/// internally.
pub trait WidgetElement: Send + Sync {
    /// Plugin type that created the element.
    fn widget_type(&self) -> &str;

    /// Text currently displayed.
    fn text(&self) -> String;

    /// Replaces the displayed text, processing escape sequences.
    fn update_text(&self, text: &str);

    /// Applies a resolved style.
    fn apply_style(&self, style: &Style);

    /// Style last applied.
    fn style(&self) -> Style;

    /// Measured size; `0×0` until the surface has laid the element out.
    fn size(&self) -> Property<Size>;

    /// Moves the element's top-left corner.
    fn set_position(&self, position: Point);

    /// Top-left corner, if placed.
    fn position(&self) -> Option<Point>;

    /// Releases background work. Idempotent.
    fn destroy(&self);

    /// Whether [`destroy`](Self::destroy) was called.
    fn is_destroyed(&self) -> bool;
}

/// Reads a text field from a widget config.
///
/// Strings are returned as-is and numbers or booleans are converted.
/// Missing or `null` fields are `None`.
///
/// # Errors
///
/// Returns [`WidgetError::InvalidConfig`] for arrays and objects.
pub(crate) fn config_string(
    widget: &str,
    config: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, WidgetError> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(WidgetError::InvalidConfig {
            widget: widget.to_string(),
            field: key.to_string(),
            details: format!("expected text, found {other}"),
        }),
    }
}
