use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use super::{CHANGE_CHANNEL_CAPACITY, FileWatcher, SettingsError, SettingsPort};

/// Settings persisted as a flat JSON object of strings.
///
/// Writes go to a temporary file that is then renamed over the real one,
/// so readers never observe a half-written file. With
/// [`start_watching`](FileSettings::start_watching) edits made by other
/// processes are picked up and announced like local writes.
pub struct FileSettings {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
    changes: broadcast::Sender<String>,
    watch_task: Mutex<Option<JoinHandle<()>>>,
}

impl FileSettings {
    /// Opens the settings file at `path`.
    ///
    /// A missing file is an empty store. An unreadable or malformed file
    /// is logged and also treated as empty; it is replaced on first write.
    pub fn open(path: impl Into<PathBuf>) -> Arc<Self> {
        let path = path.into();
        let values = read_file(&path).unwrap_or_default();
        debug!(path = %path.display(), keys = values.len(), "settings loaded");

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Arc::new(Self {
            path,
            values: RwLock::new(values),
            changes,
            watch_task: Mutex::new(None),
        })
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Watches the settings file for changes made by other processes.
    ///
    /// Must be called from within a Tokio runtime. Calling it again
    /// replaces the previous watch.
    ///
    /// # Errors
    /// Returns `SettingsError::FileWatchError` if the directory cannot be
    /// created or watched.
    pub fn start_watching(self: &Arc<Self>) -> Result<(), SettingsError> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| SettingsError::FileWatchError {
            path: dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let (mut watcher, mut events) = FileWatcher::new()?;
        watcher.watch_dir(dir)?;

        let file_name = self.path.file_name().map(ToOwned::to_owned);
        let settings = Arc::downgrade(self);

        let task = tokio::spawn(async move {
            let _watcher = watcher;
            while let Some(event) = events.recv().await {
                if event.path.file_name() != file_name.as_deref() {
                    continue;
                }
                let Some(settings) = settings.upgrade() else {
                    break;
                };
                let changed = settings.reload();
                if !changed.is_empty() {
                    debug!(?changed, kind = ?event.kind, "settings changed on disk");
                }
            }
        });

        let previous = self
            .watch_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }

        info!("Watching settings file {}", self.path.display());
        Ok(())
    }

    /// Re-reads the file and announces every key whose value differs.
    ///
    /// Returns the changed keys. A file that exists but cannot be parsed
    /// leaves the current values in place.
    pub fn reload(&self) -> Vec<String> {
        let Some(fresh) = read_file(&self.path) else {
            return Vec::new();
        };

        let changed: Vec<String> = {
            let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
            let changed = values
                .keys()
                .chain(fresh.keys())
                .filter(|key| values.get(*key) != fresh.get(*key))
                .cloned()
                .collect::<std::collections::BTreeSet<_>>()
                .into_iter()
                .collect();
            *values = fresh;
            changed
        };

        for key in &changed {
            let _ = self.changes.send(key.clone());
        }

        changed
    }

    fn write_atomically(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(values).map_err(|e| {
            SettingsError::SerializationError {
                details: e.to_string(),
            }
        })?;

        let persistence_error = |path: &Path, e: std::io::Error| SettingsError::PersistenceError {
            path: path.to_path_buf(),
            details: e.to_string(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| persistence_error(parent, e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| persistence_error(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| persistence_error(&self.path, e))?;

        Ok(())
    }
}

impl SettingsPort for FileSettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        {
            let mut values = self.values.write().map_err(|_| SettingsError::LockError {
                lock_type: "write".to_string(),
                details: format!("settings key '{key}'"),
            })?;

            let mut updated = values.clone();
            updated.insert(key.to_string(), value.to_string());
            self.write_atomically(&updated)?;
            *values = updated;
        }

        let _ = self.changes.send(key.to_string());
        Ok(())
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}

impl Drop for FileSettings {
    fn drop(&mut self) {
        if let Some(task) = self
            .watch_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}

/// `None` when the file exists but is unusable.
fn read_file(path: &Path) -> Option<BTreeMap<String, String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Some(BTreeMap::new()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read settings file");
            return None;
        }
    };

    if content.trim().is_empty() {
        return Some(BTreeMap::new());
    }

    match serde_json::from_str(&content) {
        Ok(values) => Some(values),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed settings file");
            None
        }
    }
}
