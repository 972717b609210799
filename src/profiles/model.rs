use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{DeserializeOwned, MapAccess, Visitor},
    ser::SerializeMap,
};
use serde_json::{Map, Value};
use tracing::warn;

use crate::layout::AnchorSpec;

/// Smallest allowed grid dimension.
pub const GRID_MIN: u32 = 2;
/// Largest allowed grid dimension.
pub const GRID_MAX: u32 = 12;
/// Column count for new and migrated profiles.
pub const DEFAULT_GRID_COLUMNS: u32 = 6;
/// Row count for new and migrated profiles.
pub const DEFAULT_GRID_ROWS: u32 = 4;
/// Id of the profile created when nothing usable is stored.
pub const DEFAULT_PROFILE_ID: &str = "default";
/// Name of the profile created when nothing usable is stored.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// How widget entries of a profile are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// Cell coordinates on a `gridColumns`×`gridRows` grid.
    #[default]
    Grid,
    /// Absolute pixel coordinates.
    Coordinate,
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionMode::Grid => write!(f, "grid"),
            PositionMode::Coordinate => write!(f, "coordinate"),
        }
    }
}

impl FromStr for PositionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(PositionMode::Grid),
            "coordinate" => Ok(PositionMode::Coordinate),
            other => Err(format!("unknown position mode '{other}'")),
        }
    }
}

/// Clamps a grid dimension into `[GRID_MIN, GRID_MAX]`.
pub fn clamp_grid(value: u32) -> u32 {
    value.clamp(GRID_MIN, GRID_MAX)
}

/// Reads a field whose null or malformed value falls back to the default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring malformed stored field");
        T::default()
    }))
}

/// Reads a widget list, dropping items that are not widget objects.
fn lenient_widgets<'de, D>(deserializer: D) -> Result<Option<Vec<WidgetEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Value>> = lenient(deserializer)?;
    let Some(items) = items else {
        return Ok(None);
    };
    let widgets = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "dropping malformed widget entry");
                None
            }
        })
        .collect();
    Ok(Some(widgets))
}

/// One configured widget inside a profile.
///
/// Grid and coordinate fields may both be present; the layout reads only
/// the pair matching the profile's mode. Fields this version does not
/// know about are carried through `extra` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEntry {
    /// Unique id within the profile. Empty until the store assigns one.
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: String,

    /// Plugin type id.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub widget_type: String,

    /// Plugin-specific configuration plus an optional `style` override.
    #[serde(default, deserialize_with = "lenient")]
    pub config: Map<String, Value>,

    /// Grid column, in cells.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub grid_col: Option<f64>,

    /// Grid row, in cells.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub grid_row: Option<f64>,

    /// Absolute x, in pixels.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    /// Absolute y, in pixels.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    /// Overrides the plugin's default anchor.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorSpec>,

    /// Unrecognized fields, preserved across load and save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WidgetEntry {
    /// New entry of the given plugin type with an empty configuration.
    pub fn new(widget_type: impl Into<String>) -> Self {
        Self {
            widget_type: widget_type.into(),
            ..Self::default()
        }
    }

    /// Builder-style configuration setter.
    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }

    /// The raw `style` override object, if any.
    pub fn style_override(&self) -> Option<&Map<String, Value>> {
        self.config.get("style").and_then(Value::as_object)
    }

    /// Applies every field set in `update`, leaving the rest untouched.
    pub fn apply_position(&mut self, update: &PositionUpdate) {
        if let Some(col) = update.grid_col {
            self.grid_col = Some(col);
        }
        if let Some(row) = update.grid_row {
            self.grid_row = Some(row);
        }
        if let Some(x) = update.x {
            self.x = Some(x);
        }
        if let Some(y) = update.y {
            self.y = Some(y);
        }
        if let Some(anchor) = &update.anchor {
            self.anchor = Some(anchor.clone());
        }
    }

    /// Shallow merge: every top-level key of `partial` replaces the
    /// existing key.
    pub fn merge_config(&mut self, partial: &Map<String, Value>) {
        for (key, value) in partial {
            self.config.insert(key.clone(), value.clone());
        }
    }
}

/// Partial position change. `None` fields are left as they are.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    /// New grid column.
    #[serde(default)]
    pub grid_col: Option<f64>,
    /// New grid row.
    #[serde(default)]
    pub grid_row: Option<f64>,
    /// New absolute x.
    #[serde(default)]
    pub x: Option<f64>,
    /// New absolute y.
    #[serde(default)]
    pub y: Option<f64>,
    /// New anchor.
    #[serde(default)]
    pub anchor: Option<AnchorSpec>,
}

impl PositionUpdate {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.grid_col.is_none()
            && self.grid_row.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.anchor.is_none()
    }
}

/// A named layout.
///
/// Mode, grid size and widget list are optional only so that stored data
/// from older versions can be told apart from current data during
/// migration. After [`migrate`](super::migrate) they are always set; the
/// accessors fall back to the documented defaults either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Placement strategy.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub position_mode: Option<PositionMode>,

    /// Grid column count.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<u32>,

    /// Grid row count.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub grid_rows: Option<u32>,

    /// Widget entries in display order.
    #[serde(
        default,
        deserialize_with = "lenient_widgets",
        skip_serializing_if = "Option::is_none"
    )]
    pub widgets: Option<Vec<WidgetEntry>>,

    /// Unrecognized fields, preserved across load and save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Fully populated profile in grid mode with the default grid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position_mode: Some(PositionMode::Grid),
            grid_columns: Some(DEFAULT_GRID_COLUMNS),
            grid_rows: Some(DEFAULT_GRID_ROWS),
            widgets: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    /// Current position mode.
    pub fn mode(&self) -> PositionMode {
        self.position_mode.unwrap_or_default()
    }

    /// Grid column count, always within `[GRID_MIN, GRID_MAX]`.
    ///
    /// A missing or zero stored value reads as the default.
    pub fn columns(&self) -> u32 {
        grid_dimension(self.grid_columns, DEFAULT_GRID_COLUMNS)
    }

    /// Grid row count, always within `[GRID_MIN, GRID_MAX]`.
    pub fn rows(&self) -> u32 {
        grid_dimension(self.grid_rows, DEFAULT_GRID_ROWS)
    }

    /// Widget entries in display order.
    pub fn widgets(&self) -> &[WidgetEntry] {
        self.widgets.as_deref().unwrap_or(&[])
    }

    pub(crate) fn widgets_mut(&mut self) -> &mut Vec<WidgetEntry> {
        self.widgets.get_or_insert_with(Vec::new)
    }

    /// Entry with the given uuid.
    pub fn widget(&self, uuid: &str) -> Option<&WidgetEntry> {
        self.widgets().iter().find(|w| w.uuid == uuid)
    }

    pub(crate) fn widget_mut(&mut self, uuid: &str) -> Option<&mut WidgetEntry> {
        self.widgets
            .as_mut()
            .and_then(|widgets| widgets.iter_mut().find(|w| w.uuid == uuid))
    }
}

fn grid_dimension(stored: Option<u32>, default: u32) -> u32 {
    stored.filter(|v| *v > 0).map_or(default, clamp_grid)
}

/// Profiles keyed by id, in insertion order.
///
/// Serialized as a JSON object. Order matters: when the active profile
/// is deleted the first remaining profile takes over.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileMap {
    entries: Vec<(String, Profile)>,
}

impl ProfileMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile with the given id.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.entries.iter().find(|(key, _)| key == id).map(|(_, p)| p)
    }

    /// Mutable profile with the given id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == id)
            .map(|(_, p)| p)
    }

    /// Whether a profile with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Inserts or replaces. A replaced profile keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, profile: Profile) -> Option<Profile> {
        let id = id.into();
        match self.get_mut(&id) {
            Some(existing) => Some(std::mem::replace(existing, profile)),
            None => {
                self.entries.push((id, profile));
                None
            }
        }
    }

    /// Removes a profile, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Profile> {
        let index = self.entries.iter().position(|(key, _)| key == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Id of the first profile in iteration order.
    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    /// Iterates `(id, profile)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.entries.iter().map(|(key, p)| (key.as_str(), p))
    }

    /// Iterates profiles mutably in order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Profile> {
        self.entries.iter_mut().map(|(_, p)| p)
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no profiles.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ProfileMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, profile) in &self.entries {
            map.serialize_entry(id, profile)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProfileMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ProfileMapVisitor;

        impl<'de> Visitor<'de> for ProfileMapVisitor {
            type Value = ProfileMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of profile id to profile")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ProfileMap, A::Error> {
                let mut profiles = ProfileMap::new();
                while let Some((id, value)) = access.next_entry::<String, Value>()? {
                    match serde_json::from_value::<Profile>(value) {
                        Ok(profile) => {
                            profiles.insert(id, profile);
                        }
                        Err(e) => warn!(%id, error = %e, "dropping malformed profile"),
                    }
                }
                Ok(profiles)
            }
        }

        deserializer.deserialize_map(ProfileMapVisitor)
    }
}

/// Everything stored under the profiles key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRoot {
    /// Id of the profile being rendered.
    #[serde(default, deserialize_with = "lenient")]
    pub active_profile_id: Option<String>,

    /// All profiles. Required: a document without it is not a root.
    pub profiles: ProfileMap,
}

impl ConfigRoot {
    /// Root holding only the default profile, which is active.
    pub fn with_default_profile() -> Self {
        let mut profiles = ProfileMap::new();
        profiles.insert(DEFAULT_PROFILE_ID, Profile::new(DEFAULT_PROFILE_NAME));

        Self {
            active_profile_id: Some(DEFAULT_PROFILE_ID.to_string()),
            profiles,
        }
    }

    /// Active profile id after repair.
    ///
    /// A pointer to a missing profile, or no pointer at all, resolves to the
    /// first profile in iteration order.
    pub fn effective_active_id(&self) -> Option<&str> {
        self.active_profile_id
            .as_deref()
            .filter(|id| self.profiles.contains(id))
            .or_else(|| self.profiles.first_id())
    }

    /// Active profile after repair.
    pub fn active_profile(&self) -> Option<(&str, &Profile)> {
        let id = self.effective_active_id()?;
        self.profiles.get(id).map(|profile| (id, profile))
    }

    /// Whether `id` is the profile currently rendered.
    pub fn is_active(&self, id: &str) -> bool {
        self.effective_active_id() == Some(id)
    }
}

/// Listing row for a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Profile id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this is the rendered profile.
    pub is_active: bool,
    /// Number of widget entries.
    pub widget_count: usize,
    /// Placement strategy.
    pub position_mode: PositionMode,
}
