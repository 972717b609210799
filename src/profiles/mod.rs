//! Profiles and their widget entries.
//!
//! A profile is a named layout: a position mode, grid dimensions and an
//! ordered list of widget entries. All profiles, plus the pointer to the
//! active one, are stored as a single JSON document through a
//! [`SettingsPort`](crate::settings::SettingsPort).
//!
//! [`ProfileStore`] is the only way to change that document. It persists
//! every mutation immediately and tells subscribers when the active
//! profile changed, which is what drives re-rendering.

mod draft;
mod migration;
mod model;
mod observers;
mod store;

#[cfg(test)]
mod tests;

pub use draft::WidgetDraft;
pub use migration::migrate;
pub use model::{
    ConfigRoot, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, DEFAULT_PROFILE_ID, DEFAULT_PROFILE_NAME,
    GRID_MAX, GRID_MIN, PositionMode, PositionUpdate, Profile, ProfileMap, ProfileSummary,
    WidgetEntry, clamp_grid,
};
pub use observers::{ObserverHandle, ObserverRegistry, ObserverResult};
pub use store::{PROFILES_BACKUP_KEY, PROFILES_KEY, ProfileStore};
