//! Key-value settings storage.
//!
//! The profile store keeps its data as a single string under one key of
//! a host settings store. [`SettingsPort`] is the narrow interface it
//! needs from that host: read a string, write a string, and hear about
//! keys changed by any writer, including other processes.

mod error;
mod file;
mod file_watcher;
mod memory;

#[cfg(test)]
mod tests;

pub use error::SettingsError;
pub use file::FileSettings;
pub use file_watcher::{FileEvent, FileEventKind, FileWatcher};
pub use memory::MemorySettings;

use tokio::sync::broadcast;

/// Schema id the widget settings are stored under.
pub const SCHEMA_ID: &str = "org.gnome.shell.extensions.desktop-widgets";

/// Capacity of the change channel of the bundled implementations.
pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// String settings with change notification.
///
/// Every successful write, whoever made it, is announced on the channel
/// returned by [`subscribe_changes`](SettingsPort::subscribe_changes) with
/// the key that changed.
pub trait SettingsPort: Send + Sync {
    /// Current value of `key`, if set.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when the value cannot be persisted.
    fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Receiver for the keys of subsequent changes.
    fn subscribe_changes(&self) -> broadcast::Receiver<String>;
}
