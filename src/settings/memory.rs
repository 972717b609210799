use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use tokio::sync::broadcast;

use super::{CHANGE_CHANNEL_CAPACITY, SettingsError, SettingsPort};

/// In-process settings store.
///
/// Backs tests and headless previews. Two handles to the same
/// `MemorySettings` behave like two processes sharing one host store.
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
    changes: broadcast::Sender<String>,
}

impl MemorySettings {
    /// Empty store.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: RwLock::new(HashMap::new()),
            changes,
        }
    }

    /// Store pre-populated with one key.
    pub fn with_value(key: &str, value: &str) -> Self {
        let settings = Self::new();
        settings
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        settings
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPort for MemorySettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values
            .write()
            .map_err(|_| SettingsError::LockError {
                lock_type: "write".to_string(),
                details: format!("settings key '{key}'"),
            })?
            .insert(key.to_string(), value.to_string());

        let _ = self.changes.send(key.to_string());
        Ok(())
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}
