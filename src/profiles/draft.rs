use serde_json::{Map, Value};
use tracing::debug;

use super::{
    model::{PositionMode, PositionUpdate, Profile, WidgetEntry},
    store::ProfileStore,
};
use crate::layout::{AnchorSpec, DEFAULT_COORDINATE};

/// Uncommitted edits to one widget entry.
///
/// Settings panels change the draft freely; the store is only touched by
/// [`commit`](WidgetDraft::commit), which writes the position for the
/// profile's current mode together with the edited configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDraft {
    uuid: String,
    mode: PositionMode,
    grid_col: f64,
    grid_row: f64,
    x: f64,
    y: f64,
    anchor: AnchorSpec,
    config: Map<String, Value>,
}

impl WidgetDraft {
    /// Draft seeded from `entry` as it would currently be placed in
    /// `profile`. Unset coordinates take their layout defaults and the
    /// anchor falls back to the plugin default, then `center-center`.
    pub fn new(entry: &WidgetEntry, profile: &Profile, plugin_anchor: Option<&AnchorSpec>) -> Self {
        let anchor = entry
            .anchor
            .clone()
            .filter(|spec| !spec.is_blank())
            .or_else(|| plugin_anchor.cloned().filter(|spec| !spec.is_blank()))
            .unwrap_or_else(|| AnchorSpec::from("center-center"));

        Self {
            uuid: entry.uuid.clone(),
            mode: profile.mode(),
            grid_col: entry.grid_col.unwrap_or(f64::from(profile.columns()) / 2.0),
            grid_row: entry.grid_row.unwrap_or(f64::from(profile.rows()) / 2.0),
            x: entry.x.unwrap_or(DEFAULT_COORDINATE),
            y: entry.y.unwrap_or(DEFAULT_COORDINATE),
            anchor,
            config: entry.config.clone(),
        }
    }

    /// Uuid of the widget being edited.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Configuration as edited so far.
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Selected anchor.
    pub fn anchor(&self) -> &AnchorSpec {
        &self.anchor
    }

    /// Sets grid coordinates.
    pub fn set_grid(&mut self, col: f64, row: f64) {
        self.grid_col = col;
        self.grid_row = row;
    }

    /// Sets pixel coordinates.
    pub fn set_coordinates(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Sets the anchor.
    pub fn set_anchor(&mut self, anchor: AnchorSpec) {
        self.anchor = anchor;
    }

    /// Sets one plugin configuration value.
    pub fn set_config_value(&mut self, key: &str, value: Value) {
        self.config.insert(key.to_string(), value);
    }

    /// Removes one plugin configuration value.
    pub fn remove_config_value(&mut self, key: &str) -> Option<Value> {
        self.config.remove(key)
    }

    /// Sets one style property, keeping the other overrides.
    pub fn set_style_value(&mut self, key: &str, value: Value) {
        let style = self
            .config
            .entry("style")
            .or_insert_with(|| Value::Object(Map::new()));

        if !style.is_object() {
            *style = Value::Object(Map::new());
        }
        if let Value::Object(style) = style {
            style.insert(key.to_string(), value);
        }
    }

    /// Position fields written on commit: the pair for the current mode
    /// plus the anchor.
    pub fn position_update(&self) -> PositionUpdate {
        let anchor = Some(self.anchor.clone());
        match self.mode {
            PositionMode::Grid => PositionUpdate {
                grid_col: Some(self.grid_col),
                grid_row: Some(self.grid_row),
                anchor,
                ..PositionUpdate::default()
            },
            PositionMode::Coordinate => PositionUpdate {
                x: Some(self.x),
                y: Some(self.y),
                anchor,
                ..PositionUpdate::default()
            },
        }
    }

    /// Writes the draft to the store as a single change.
    ///
    /// The stored configuration becomes the draft's, so keys removed while
    /// editing are gone afterwards. Returns false if the profile or widget
    /// no longer exists.
    pub fn commit(&self, store: &ProfileStore, profile_id: &str) -> bool {
        let saved = store.save_widget(
            profile_id,
            &self.uuid,
            &self.position_update(),
            &self.config,
        );
        if saved {
            debug!(uuid = %self.uuid, "widget draft committed");
        }
        saved
    }
}
