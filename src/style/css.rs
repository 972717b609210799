use std::sync::OnceLock;

use regex::Regex;

use super::{Style, TextAlign};

static RGB_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static HEX_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static SHORT_HEX_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn rgb_regex() -> Option<&'static Regex> {
    RGB_REGEX
        .get_or_init(|| Regex::new(r"(?i)^rgb\((\d+),\s*(\d+),\s*(\d+)\)$").ok())
        .as_ref()
}

fn hex_regex() -> Option<&'static Regex> {
    HEX_REGEX
        .get_or_init(|| Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$").ok())
        .as_ref()
}

fn short_hex_regex() -> Option<&'static Regex> {
    SHORT_HEX_REGEX
        .get_or_init(|| Regex::new(r"(?i)^#?([a-f\d])([a-f\d])([a-f\d])$").ok())
        .as_ref()
}

/// Horizontal placement of text inside its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Leading edge.
    Start,
    /// Centered.
    Center,
    /// Trailing edge.
    End,
}

impl From<TextAlign> for Align {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => Align::Start,
            TextAlign::Center => Align::Center,
            TextAlign::Right => Align::End,
        }
    }
}

/// Converts `rgb(r, g, b)`, `#rrggbb` or `#rgb` to `rgba(r,g,b,opacity)`.
///
/// Anything else is returned unchanged, opacity dropped.
pub fn color_to_rgba(color: &str, opacity: f64) -> String {
    if let Some(caps) = rgb_regex().and_then(|re| re.captures(color)) {
        return format!("rgba({},{},{},{opacity})", &caps[1], &caps[2], &caps[3]);
    }

    let channels = hex_regex()
        .and_then(|re| re.captures(color))
        .map(|caps| [caps[1].to_string(), caps[2].to_string(), caps[3].to_string()])
        .or_else(|| {
            short_hex_regex().and_then(|re| re.captures(color)).map(|caps| {
                [1, 2, 3].map(|i| caps[i].repeat(2))
            })
        });

    let Some(channels) = channels else {
        return color.to_string();
    };

    let mut rgb = [0u8; 3];
    for (value, hex) in rgb.iter_mut().zip(&channels) {
        match u8::from_str_radix(hex, 16) {
            Ok(parsed) => *value = parsed,
            Err(_) => return color.to_string(),
        }
    }

    format!("rgba({},{},{},{opacity})", rgb[0], rgb[1], rgb[2])
}

/// Inline CSS for the widget container: background, border, shadow and
/// spacing. Directives are joined with `"; "`.
pub fn container_css(style: &Style) -> String {
    let mut rules = Vec::new();

    if style.background && !style.background_color.is_empty() {
        rules.push(format!(
            "background-color: {}",
            color_to_rgba(&style.background_color, style.background_opacity)
        ));
    }

    if style.border_radius > 0.0 {
        rules.push(format!("border-radius: {}px", style.border_radius));
    }

    if style.border && style.border_width > 0.0 && !style.border_color.is_empty() {
        rules.push(format!(
            "border: {}px solid {}",
            style.border_width,
            color_to_rgba(&style.border_color, style.border_opacity)
        ));
    }

    if style.box_shadow {
        rules.push(format!(
            "box-shadow: {}px {}px {}px {}px {}",
            style.box_shadow_offset_x,
            style.box_shadow_offset_y,
            style.box_shadow_blur,
            style.box_shadow_spread,
            color_to_rgba(&style.box_shadow_color, style.box_shadow_opacity)
        ));
    }

    for (property, value) in [
        ("padding", style.padding),
        ("margin", style.margin),
        ("max-width", style.max_width),
        ("max-height", style.max_height),
    ] {
        if value > 0.0 {
            rules.push(format!("{property}: {value}px"));
        }
    }

    rules.join("; ")
}

/// Inline CSS for the text node: font, color, spacing and text shadow.
pub fn text_css(style: &Style) -> String {
    let mut rules = Vec::new();

    if let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty()) {
        rules.push(format!("font-family: \"{family}\""));
    }
    if style.font_size > 0.0 {
        rules.push(format!("font-size: {}px", style.font_size));
    }
    rules.push(format!("font-weight: {}", style.font_weight));

    if !style.font_color.is_empty() {
        let color = if style.font_opacity < 1.0 {
            color_to_rgba(&style.font_color, style.font_opacity)
        } else {
            style.font_color.clone()
        };
        rules.push(format!("color: {color}"));
    }

    if style.letter_spacing != 0.0 {
        rules.push(format!("letter-spacing: {}px", style.letter_spacing));
    }
    rules.push(format!("text-align: {}", style.text_align));

    if style.text_shadow {
        rules.push(format!(
            "text-shadow: {}px {}px {}px {}",
            style.text_shadow_offset_x,
            style.text_shadow_offset_y,
            style.text_shadow_blur,
            color_to_rgba(&style.text_shadow_color, style.text_shadow_opacity)
        ));
    }

    rules.join("; ")
}
