//! Toolkit-independent description of a widget's settings form.
//!
//! A settings builder returns a [`SettingsPage`]: groups of typed fields,
//! each carrying its current value. Whatever renders the form routes edits
//! back through [`SettingsField::apply`], which writes into a
//! [`WidgetDraft`] so nothing reaches the store before the user saves.

mod appearance;

use serde::Serialize;
use serde_json::Value;

use crate::profiles::WidgetDraft;

pub use appearance::{FONT_WEIGHTS, TEXT_ALIGNMENTS, base_style_groups};

/// Everything a settings form shows for one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPage {
    /// Widget-specific groups.
    pub content_groups: Vec<SettingsGroup>,
    /// Style groups.
    pub appearance_groups: Vec<SettingsGroup>,
}

/// A titled block of fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsGroup {
    /// Group heading.
    pub title: String,
    /// Fields in display order.
    pub fields: Vec<SettingsField>,
}

impl SettingsGroup {
    /// Empty group.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn with_field(mut self, field: SettingsField) -> Self {
        self.fields.push(field);
        self
    }

    /// Field editing `key`, if present.
    pub fn field(&self, key: &str) -> Option<&SettingsField> {
        self.fields.iter().find(|field| field.key == key)
    }
}

/// Where an edited value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTarget {
    /// A top-level key of the widget config.
    Config,
    /// A key of the `style` override.
    Style,
    /// Read-only, never written.
    Display,
}

/// One selectable entry of a [`FieldKind::Choice`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    /// Label shown to the user.
    pub label: String,
    /// Value stored when selected; `null` means "keep the current value".
    pub value: Value,
}

/// Input control of a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line text entry.
    #[serde(rename_all = "camelCase")]
    Text {
        /// Width hint in characters.
        width_chars: u32,
    },
    /// Spin button. The shown value is the stored value times `multiplier`.
    Number {
        /// Lowest shown value.
        lower: f64,
        /// Highest shown value.
        upper: f64,
        /// Increment.
        step: f64,
        /// Stored-to-shown factor, e.g. 100 for percentages.
        multiplier: f64,
    },
    /// Color picker producing `#rrggbb`.
    Color,
    /// On/off switch.
    Switch,
    /// Font family chooser.
    FontFamily,
    /// Drop-down list.
    Choice {
        /// Entries in display order.
        options: Vec<ChoiceOption>,
    },
    /// Read-only label.
    #[serde(rename_all = "camelCase")]
    Preview {
        /// Width hint in characters.
        max_chars: u32,
    },
}

/// A single labelled control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsField {
    /// Config or style key edited by this field.
    pub key: String,
    /// Row title.
    pub label: String,
    /// Optional row subtitle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Control type.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Where edits go.
    pub target: FieldTarget,
    /// Current value as shown in the control.
    pub value: Value,
    /// Hidden rows depend on a switch that is off.
    pub visible: bool,
}

impl SettingsField {
    /// Field editing a top-level config key.
    pub fn config(key: &str, label: &str, kind: FieldKind, value: Value) -> Self {
        Self::build(key, label, kind, FieldTarget::Config, value)
    }

    /// Field editing a style key.
    pub fn style(key: &str, label: &str, kind: FieldKind, value: Value) -> Self {
        Self::build(key, label, kind, FieldTarget::Style, value)
    }

    /// Read-only field.
    pub fn display(key: &str, label: &str, kind: FieldKind, value: Value) -> Self {
        Self::build(key, label, kind, FieldTarget::Display, value)
    }

    fn build(key: &str, label: &str, kind: FieldKind, target: FieldTarget, value: Value) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            subtitle: None,
            kind,
            target,
            value,
            visible: true,
        }
    }

    /// Adds a subtitle.
    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    /// Sets visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Writes a value entered in this field's control into `draft`.
    ///
    /// Number fields divide by their multiplier first. Choices with a
    /// `null` value and read-only fields change nothing. Returns whether
    /// the draft was modified.
    pub fn apply(&self, draft: &mut WidgetDraft, shown: Value) -> bool {
        let stored = match (&self.kind, shown) {
            (_, Value::Null) => return false,
            (FieldKind::Number { multiplier, .. }, Value::Number(number)) => {
                match number.as_f64() {
                    Some(shown) => Value::from(shown / multiplier),
                    None => return false,
                }
            }
            (_, shown) => shown,
        };

        match self.target {
            FieldTarget::Config => draft.set_config_value(&self.key, stored),
            FieldTarget::Style => draft.set_style_value(&self.key, stored),
            FieldTarget::Display => return false,
        }
        true
    }
}
