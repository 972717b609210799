use serde_json::{Map, Value};

use super::{ChoiceOption, FieldKind, SettingsField, SettingsGroup};
use crate::style::Style;

/// Font weight choices as `(label, value)`.
pub const FONT_WEIGHTS: [(&str, &str); 9] = [
    ("Thin", "100"),
    ("Extra Light", "200"),
    ("Light", "300"),
    ("Regular", "400"),
    ("Medium", "500"),
    ("Semi Bold", "600"),
    ("Bold", "700"),
    ("Extra Bold", "800"),
    ("Black", "900"),
];

/// Text alignment choices as `(label, value)`.
pub const TEXT_ALIGNMENTS: [(&str, &str); 3] =
    [("Left", "left"), ("Center", "center"), ("Right", "right")];

const OPACITY: FieldKind = FieldKind::Number {
    lower: 0.0,
    upper: 100.0,
    step: 5.0,
    multiplier: 100.0,
};

const fn spin(lower: f64, upper: f64) -> FieldKind {
    FieldKind::Number {
        lower,
        upper,
        step: 1.0,
        multiplier: 1.0,
    }
}

fn choices(entries: &[(&str, &str)]) -> FieldKind {
    FieldKind::Choice {
        options: entries
            .iter()
            .map(|(label, value)| ChoiceOption {
                label: label.to_string(),
                value: Value::from(*value),
            })
            .collect(),
    }
}

/// Style values as a JSON object, overrides applied.
struct Current(Map<String, Value>);

impl Current {
    fn get(&self, key: &str) -> Value {
        self.0.get(key).cloned().unwrap_or(Value::Null)
    }

    fn enabled(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn color(&self, key: &str, label: &str) -> SettingsField {
        SettingsField::style(key, label, FieldKind::Color, self.get(key))
    }

    fn number(&self, key: &str, label: &str, kind: FieldKind) -> SettingsField {
        let multiplier = match &kind {
            FieldKind::Number { multiplier, .. } => *multiplier,
            _ => 1.0,
        };
        let shown = self
            .0
            .get(key)
            .and_then(Value::as_f64)
            .map_or(Value::Null, |value| {
                // Percentages are whole numbers in the control.
                if multiplier == 1.0 {
                    Value::from(value)
                } else {
                    Value::from((value * multiplier).round())
                }
            });

        SettingsField::style(key, label, kind, shown)
    }

    /// Group led by an enable switch; the other rows are hidden while it
    /// is off.
    fn switched(&self, title: &str, switch_key: &str, switch_label: &str, rows: Vec<SettingsField>) -> SettingsGroup {
        let enabled = self.enabled(switch_key);
        let group = SettingsGroup::new(title).with_field(SettingsField::style(
            switch_key,
            switch_label,
            FieldKind::Switch,
            Value::from(enabled),
        ));

        rows.into_iter()
            .fold(group, |group, row| group.with_field(row.with_visible(enabled)))
    }
}

/// Appearance groups shared by every built-in widget, filled from the
/// `style` override in `config`.
pub fn base_style_groups(config: &Map<String, Value>) -> Vec<SettingsGroup> {
    let style = Style::resolve(config.get("style").and_then(Value::as_object));
    let current = match serde_json::to_value(&style) {
        Ok(Value::Object(map)) => Current(map),
        _ => Current(Map::new()),
    };

    let weight = style
        .font_weight
        .as_number()
        .map_or_else(|| style.font_weight.to_string(), |w| w.to_string());

    let typography = SettingsGroup::new("Typography")
        .with_field(current.color("fontColor", "Color"))
        .with_field(current.number("fontOpacity", "Opacity", OPACITY))
        .with_field(SettingsField::style(
            "fontFamily",
            "Family",
            FieldKind::FontFamily,
            current.get("fontFamily"),
        ))
        .with_field(current.number("fontSize", "Size", spin(8.0, 128.0)))
        .with_field(SettingsField::style(
            "fontWeight",
            "Weight",
            choices(&FONT_WEIGHTS),
            Value::from(weight),
        ))
        .with_field(current.number("letterSpacing", "Letter Spacing", spin(-10.0, 20.0)))
        .with_field(SettingsField::style(
            "textAlign",
            "Text Align",
            choices(&TEXT_ALIGNMENTS),
            current.get("textAlign"),
        ));

    let background = current.switched(
        "Background",
        "background",
        "Enable Background",
        vec![
            current.color("backgroundColor", "Color"),
            current.number("backgroundOpacity", "Opacity", OPACITY),
        ],
    );

    let border = current.switched(
        "Border",
        "border",
        "Enable Border",
        vec![
            current.color("borderColor", "Color"),
            current.number("borderOpacity", "Opacity", OPACITY),
            current.number("borderWidth", "Width", spin(0.0, 20.0)),
            current.number("borderRadius", "Radius", spin(0.0, 50.0)),
        ],
    );

    let spacing = SettingsGroup::new("Spacing")
        .with_field(current.number("padding", "Padding", spin(0.0, 50.0)))
        .with_field(current.number("margin", "Margin", spin(0.0, 50.0)));

    let text_shadow = current.switched(
        "Text Shadow",
        "textShadow",
        "Enable Text Shadow",
        vec![
            current.color("textShadowColor", "Color"),
            current.number("textShadowOpacity", "Opacity", OPACITY),
            current.number("textShadowOffsetX", "Offset X", spin(-20.0, 20.0)),
            current.number("textShadowOffsetY", "Offset Y", spin(-20.0, 20.0)),
            current.number("textShadowBlur", "Blur", spin(0.0, 20.0)),
        ],
    );

    let box_shadow = current.switched(
        "Box Shadow",
        "boxShadow",
        "Enable Box Shadow",
        vec![
            current.color("boxShadowColor", "Color"),
            current.number("boxShadowOpacity", "Opacity", OPACITY),
            current.number("boxShadowOffsetX", "Offset X", spin(-20.0, 20.0)),
            current.number("boxShadowOffsetY", "Offset Y", spin(-20.0, 20.0)),
            current.number("boxShadowBlur", "Blur", spin(0.0, 30.0)),
            current.number("boxShadowSpread", "Spread", spin(-10.0, 20.0)),
        ],
    );

    vec![typography, background, border, spacing, text_shadow, box_shadow]
}
