use std::sync::Arc;

use serde_json::{Map, Value};

use super::{
    WidgetElement, WidgetError, config_string,
    element::TextElement,
    settings::{FieldKind, SettingsField, SettingsGroup, SettingsPage, base_style_groups},
    text::{ENTRY_WIDTH_CHARS, process_escape_sequences},
};
use crate::plugins::{SettingsBuilder, WidgetFactory};

/// Plugin type id.
pub const CUSTOMTEXT_TYPE: &str = "customtext";
/// Text shown when the config has none.
pub const DEFAULT_TEXT: &str = "Hello, World!";

/// Creates labels showing user-defined text.
///
/// Config: `{ "text": string }`. `\n`, `\t` and `\\` in the text are
/// turned into the characters they stand for.
#[derive(Debug, Default)]
pub struct CustomTextFactory;

impl WidgetFactory for CustomTextFactory {
    fn create(&self, config: &Map<String, Value>) -> Result<Arc<dyn WidgetElement>, WidgetError> {
        let text = config_string(CUSTOMTEXT_TYPE, config, "text")?
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_TEXT.to_string());

        Ok(Arc::new(TextElement::new(
            CUSTOMTEXT_TYPE,
            process_escape_sequences(&text),
        )))
    }
}

/// Settings form: one text entry plus the shared appearance groups.
#[derive(Debug, Default)]
pub struct CustomTextSettings;

impl SettingsBuilder for CustomTextSettings {
    fn build(&self, config: &Map<String, Value>) -> SettingsPage {
        let text = config
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_TEXT);

        let text_group = SettingsGroup::new("Text Settings").with_field(
            SettingsField::config(
                "text",
                "Display Text",
                FieldKind::Text {
                    width_chars: ENTRY_WIDTH_CHARS,
                },
                Value::from(text),
            )
            .with_subtitle("The text to show on the desktop"),
        );

        SettingsPage {
            content_groups: vec![text_group],
            appearance_groups: base_style_groups(config),
        }
    }
}
