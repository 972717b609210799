mod format;

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use chrono::Local;
use serde_json::{Map, Value};
use tokio::{runtime::Handle, time::MissedTickBehavior};
use tracing::{debug, trace};

pub use format::{FORMAT_PRESETS, FormatPreset, find_preset, format, has_second_tokens};

use super::{
    WidgetElement, WidgetError, config_string,
    element::TextElement,
    settings::{ChoiceOption, FieldKind, SettingsField, SettingsGroup, SettingsPage, base_style_groups},
    text::{ENTRY_WIDTH_CHARS, MAX_LINES, PREVIEW_MAX_CHARS, truncate_lines},
};
use crate::plugins::{SettingsBuilder, WidgetFactory};

/// Plugin type id.
pub const DATETIME_TYPE: &str = "datetime";
/// Pattern used when the config has none.
pub const DEFAULT_FORMAT: &str = "HH:mm:ss";
/// Text shown until the first refresh.
pub const LOADING_TEXT: &str = "Loading...";

/// How often a clock showing `pattern` must be redrawn.
pub fn refresh_interval(pattern: &str) -> Duration {
    if has_second_tokens(pattern) {
        Duration::from_secs(1)
    } else {
        Duration::from_secs(60)
    }
}

fn configured_format(config: &Map<String, Value>) -> Result<String, WidgetError> {
    Ok(config_string(DATETIME_TYPE, config, "format")?
        .filter(|pattern| !pattern.is_empty())
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string()))
}

/// Creates clocks showing the local time.
///
/// Config: `{ "format": string }` with Luxon-style tokens. The element
/// refreshes itself from a background task until it is destroyed, which
/// requires creating it inside a Tokio runtime. Outside one the time is
/// shown once and never updated.
#[derive(Debug, Default)]
pub struct DateTimeFactory;

impl WidgetFactory for DateTimeFactory {
    fn create(&self, config: &Map<String, Value>) -> Result<Arc<dyn WidgetElement>, WidgetError> {
        let pattern = configured_format(config)?;
        let element = Arc::new(TextElement::new(DATETIME_TYPE, LOADING_TEXT));

        element.set_text(format(&pattern, &Local::now()));
        spawn_refresh(&element, pattern);

        Ok(element)
    }
}

fn spawn_refresh(element: &Arc<TextElement>, pattern: String) {
    let Ok(runtime) = Handle::try_current() else {
        debug!("no runtime available, clock will not refresh");
        return;
    };

    let period = refresh_interval(&pattern);
    let weak: Weak<TextElement> = Arc::downgrade(element);

    let task = runtime.spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let Some(element) = weak.upgrade() else {
                break;
            };
            if element.is_destroyed() {
                break;
            }

            trace!(%pattern, "clock tick");
            element.set_text(format(&pattern, &Local::now()));
        }
    });

    element.set_refresh_task(task);
}

/// Settings form: pattern entry, preset list and a live preview.
#[derive(Debug, Default)]
pub struct DateTimeSettings;

impl SettingsBuilder for DateTimeSettings {
    fn build(&self, config: &Map<String, Value>) -> SettingsPage {
        let pattern = configured_format(config).unwrap_or_else(|_| DEFAULT_FORMAT.to_string());

        let mut options = vec![ChoiceOption {
            label: "Custom".to_string(),
            value: Value::Null,
        }];
        options.extend(FORMAT_PRESETS.iter().map(|preset| ChoiceOption {
            label: preset.name.to_string(),
            value: Value::from(preset.format),
        }));

        let selected = find_preset(&pattern).map_or(Value::Null, |preset| Value::from(preset.format));
        let preview = truncate_lines(&format(&pattern, &Local::now()), MAX_LINES);

        let format_group = SettingsGroup::new("Format")
            .with_field(
                SettingsField::config(
                    "format",
                    "Format String",
                    FieldKind::Text {
                        width_chars: ENTRY_WIDTH_CHARS,
                    },
                    Value::from(pattern.as_str()),
                )
                .with_subtitle("Luxon-style format (e.g., HH:mm:ss, MMMM d, yyyy)"),
            )
            .with_field(
                SettingsField::config("format", "Presets", FieldKind::Choice { options }, selected)
                    .with_subtitle("Select a common format"),
            )
            .with_field(
                SettingsField::display(
                    "preview",
                    "Preview",
                    FieldKind::Preview {
                        max_chars: PREVIEW_MAX_CHARS,
                    },
                    Value::from(preview),
                )
                .with_subtitle("Current time in selected format"),
            );

        SettingsPage {
            content_groups: vec![format_group],
            appearance_groups: base_style_groups(config),
        }
    }
}
