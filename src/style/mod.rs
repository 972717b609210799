//! Widget appearance.
//!
//! A [`Style`] is a flat record with a complete set of defaults. Widget
//! entries carry a partial override under `config.style`; [`Style::resolve`]
//! lays it over the defaults key by key. [`container_css`] and
//! [`text_css`] turn a resolved style into inline CSS for the container
//! and text nodes.

mod css;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub use css::{Align, color_to_rgba, container_css, text_css};

/// Font weight as either a CSS keyword or a numeric weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    /// `100` through `900`.
    Numeric(u16),
    /// `bold`, `normal`, or a numeric weight stored as text.
    Keyword(String),
}

impl FontWeight {
    /// Numeric weight; `normal` is 400 and `bold` is 700.
    pub fn as_number(&self) -> Option<u16> {
        match self {
            FontWeight::Numeric(weight) => Some(*weight),
            FontWeight::Keyword(keyword) => match keyword.as_str() {
                "normal" => Some(400),
                "bold" => Some(700),
                other => other.parse().ok(),
            },
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::Keyword("bold".to_string())
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Numeric(weight) => write!(f, "{weight}"),
            FontWeight::Keyword(keyword) => write!(f, "{keyword}"),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        };
        f.write_str(name)
    }
}

/// Complete visual style of a widget.
///
/// Lengths are pixels and opacities are in `0.0..=1.0`. Colors are CSS
/// color strings, usually `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Text color.
    pub font_color: String,
    /// Text opacity.
    pub font_opacity: f64,
    /// Font family; the host default when unset.
    pub font_family: Option<String>,
    /// Font size.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Extra space between glyphs.
    pub letter_spacing: f64,
    /// Alignment of multi-line text.
    pub text_align: TextAlign,

    /// Whether the container has a background.
    pub background: bool,
    /// Background color.
    pub background_color: String,
    /// Background opacity.
    pub background_opacity: f64,
    /// Background blur radius. Stored, not rendered.
    pub background_blur: f64,

    /// Whether the container has a border.
    pub border: bool,
    /// Border color.
    pub border_color: String,
    /// Border opacity.
    pub border_opacity: f64,
    /// Border width.
    pub border_width: f64,
    /// Corner radius, applied even without a border.
    pub border_radius: f64,

    /// Inner spacing of the container.
    pub padding: f64,
    /// Outer spacing of the container.
    pub margin: f64,
    /// Maximum container width; `0` is unbounded.
    pub max_width: f64,
    /// Maximum container height; `0` is unbounded.
    pub max_height: f64,

    /// Whether the text casts a shadow.
    pub text_shadow: bool,
    /// Text shadow color.
    pub text_shadow_color: String,
    /// Text shadow opacity.
    pub text_shadow_opacity: f64,
    /// Horizontal text shadow offset.
    pub text_shadow_offset_x: f64,
    /// Vertical text shadow offset.
    pub text_shadow_offset_y: f64,
    /// Text shadow blur radius.
    pub text_shadow_blur: f64,

    /// Whether the container casts a shadow.
    pub box_shadow: bool,
    /// Box shadow color.
    pub box_shadow_color: String,
    /// Box shadow opacity.
    pub box_shadow_opacity: f64,
    /// Horizontal box shadow offset.
    pub box_shadow_offset_x: f64,
    /// Vertical box shadow offset.
    pub box_shadow_offset_y: f64,
    /// Box shadow blur radius.
    pub box_shadow_blur: f64,
    /// Box shadow spread.
    pub box_shadow_spread: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_color: String::from("#ffffff"),
            font_opacity: 1.0,
            font_family: None,
            font_size: 32.0,
            font_weight: FontWeight::default(),
            letter_spacing: 0.0,
            text_align: TextAlign::Center,

            background: true,
            background_color: String::from("#000000"),
            background_opacity: 0.4,
            background_blur: 0.0,

            border: false,
            border_color: String::from("#ffffff"),
            border_opacity: 0.5,
            border_width: 0.0,
            border_radius: 8.0,

            padding: 12.0,
            margin: 0.0,
            max_width: 0.0,
            max_height: 0.0,

            text_shadow: true,
            text_shadow_color: String::from("#000000"),
            text_shadow_opacity: 0.8,
            text_shadow_offset_x: 1.0,
            text_shadow_offset_y: 1.0,
            text_shadow_blur: 3.0,

            box_shadow: false,
            box_shadow_color: String::from("#000000"),
            box_shadow_opacity: 0.3,
            box_shadow_offset_x: 0.0,
            box_shadow_offset_y: 4.0,
            box_shadow_blur: 12.0,
            box_shadow_spread: 0.0,
        }
    }
}

impl Style {
    /// Defaults with `overrides` applied key by key.
    ///
    /// Unknown keys and values of the wrong type are skipped individually.
    /// A `null` value clears an optional field and is ignored elsewhere.
    pub fn resolve(overrides: Option<&Map<String, Value>>) -> Style {
        let Some(overrides) = overrides.filter(|o| !o.is_empty()) else {
            return Style::default();
        };

        let Ok(Value::Object(mut merged)) = serde_json::to_value(Style::default()) else {
            return Style::default();
        };

        for (key, value) in overrides {
            if !merged.contains_key(key) {
                debug!(key = %key, "ignoring unknown style key");
                continue;
            }

            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value.clone());

            if serde_json::from_value::<Style>(Value::Object(candidate)).is_ok() {
                merged.insert(key.clone(), value.clone());
            } else {
                warn!(key = %key, %value, "ignoring invalid style value");
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or_default()
    }

    /// Inline CSS for the container node.
    pub fn container_css(&self) -> String {
        container_css(self)
    }

    /// Inline CSS for the text node.
    pub fn text_css(&self) -> String {
        text_css(self)
    }
}
