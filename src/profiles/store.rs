use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use serde_json::{Map, Value};
use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

use super::{
    migration::migrate,
    model::{
        ConfigRoot, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, PositionMode, PositionUpdate, Profile,
        ProfileSummary, WidgetEntry, clamp_grid,
    },
    observers::{ObserverHandle, ObserverRegistry, ObserverResult},
};
use crate::settings::SettingsPort;

/// Settings key the serialized [`ConfigRoot`] is stored under.
pub const PROFILES_KEY: &str = "profiles-json";

/// Settings key an unreadable stored value is copied to before the store
/// falls back to the default profile.
pub const PROFILES_BACKUP_KEY: &str = "profiles-json-backup";

/// Owner of the persisted profile configuration.
///
/// Reads go through an in-memory copy of the root that is loaded (and
/// migrated) on first use. Every mutator writes the whole root back
/// through the [`SettingsPort`] before returning and then, if the
/// mutated profile is the active one, notifies subscribers exactly once.
///
/// Lookups of unknown profiles or widgets are not errors: mutators
/// return `false`/`None` and leave storage untouched.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct ProfileStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    settings: Arc<dyn SettingsPort>,
    state: RwLock<StoreState>,
    observers: ObserverRegistry,
    external_task: Mutex<Option<JoinHandle<()>>>,
}

#[derive(Default)]
struct StoreState {
    root: Option<ConfigRoot>,
    last_written: Option<String>,
}

impl ProfileStore {
    /// Store backed by `settings`. Nothing is read until first use.
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                settings,
                state: RwLock::new(StoreState::default()),
                observers: ObserverRegistry::new(),
                external_task: Mutex::new(None),
            }),
        }
    }

    /// Current configuration.
    ///
    /// Never fails: stored data that is missing or cannot be parsed yields
    /// a root with a single active `default` profile.
    pub fn load(&self) -> ConfigRoot {
        self.read(ConfigRoot::clone)
    }

    /// Profile with the given id.
    pub fn profile(&self, id: &str) -> Option<Profile> {
        self.read(|root| root.profiles.get(id).cloned())
    }

    /// Id of the active profile, repaired to the first profile when the
    /// stored pointer is missing or dangling.
    pub fn active_profile_id(&self) -> Option<String> {
        self.read(|root| root.effective_active_id().map(str::to_string))
    }

    /// Active profile and its id.
    pub fn active_profile(&self) -> Option<(String, Profile)> {
        self.read(|root| {
            root.active_profile()
                .map(|(id, profile)| (id.to_string(), profile.clone()))
        })
    }

    /// One summary per profile, in storage order.
    pub fn list_profiles(&self) -> Vec<ProfileSummary> {
        self.read(|root| {
            root.profiles
                .iter()
                .map(|(id, profile)| ProfileSummary {
                    id: id.to_string(),
                    name: profile.name.clone(),
                    is_active: root.is_active(id),
                    widget_count: profile.widgets().len(),
                    position_mode: profile.mode(),
                })
                .collect()
        })
    }

    /// Registers a `profiles-changed` callback.
    pub fn subscribe<F>(&self, callback: F) -> ObserverHandle
    where
        F: Fn() -> ObserverResult + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(callback)
    }

    /// Removes a callback. Returns false for an unknown handle.
    pub fn unsubscribe(&self, handle: ObserverHandle) -> bool {
        self.inner.observers.unsubscribe(handle)
    }

    /// Creates a profile in grid mode with the default grid and returns
    /// its generated id.
    ///
    /// Subscribers are only notified when the new profile becomes the
    /// active one, which happens only if it is the sole profile.
    #[instrument(skip(self))]
    pub fn create_profile(&self, name: &str) -> String {
        let id = Uuid::new_v4().to_string();

        self.mutate(|root| {
            root.profiles.insert(id.clone(), Profile::new(name));
            Some(((), root.is_active(&id)))
        });

        info!(%id, "profile created");
        id
    }

    /// Renames a profile.
    pub fn rename_profile(&self, id: &str, name: &str) -> bool {
        self.mutate(|root| {
            let notify = root.is_active(id);
            root.profiles.get_mut(id)?.name = name.to_string();
            Some(((), notify))
        })
        .is_some()
    }

    /// Deletes a profile and its widgets.
    ///
    /// Deleting the active profile activates the first remaining one, or
    /// leaves no active profile when none remain.
    #[instrument(skip(self))]
    pub fn delete_profile(&self, id: &str) -> bool {
        let deleted = self.mutate(|root| {
            let was_active = root.is_active(id);
            root.profiles.remove(id)?;

            if was_active || root.active_profile_id.as_deref() == Some(id) {
                root.active_profile_id = root.profiles.first_id().map(str::to_string);
                debug!(active = ?root.active_profile_id, "active profile reassigned");
            }

            Some(((), was_active))
        });

        if deleted.is_some() {
            info!("profile deleted");
        }
        deleted.is_some()
    }

    /// Makes `id` the active profile.
    #[instrument(skip(self))]
    pub fn set_active_profile(&self, id: &str) -> bool {
        self.mutate(|root| {
            if !root.profiles.contains(id) {
                return None;
            }
            root.active_profile_id = Some(id.to_string());
            Some(((), true))
        })
        .is_some()
    }

    /// Switches the position mode. Widget coordinates are kept as they are.
    pub fn set_position_mode(&self, id: &str, mode: PositionMode) -> bool {
        self.mutate(|root| {
            let notify = root.is_active(id);
            let profile = root.profiles.get_mut(id)?;

            profile.position_mode = Some(mode);
            if mode == PositionMode::Grid {
                profile.grid_columns.get_or_insert(DEFAULT_GRID_COLUMNS);
                profile.grid_rows.get_or_insert(DEFAULT_GRID_ROWS);
            }

            Some(((), notify))
        })
        .is_some()
    }

    /// Resizes the grid, clamped to `[2, 12]` per axis.
    ///
    /// Widgets beyond the new bounds are pulled in to the edge; the rest
    /// are left alone.
    pub fn set_grid_size(&self, id: &str, columns: u32, rows: u32) -> bool {
        let columns = clamp_grid(columns);
        let rows = clamp_grid(rows);

        self.mutate(|root| {
            let notify = root.is_active(id);
            let profile = root.profiles.get_mut(id)?;

            profile.grid_columns = Some(columns);
            profile.grid_rows = Some(rows);

            for widget in profile.widgets_mut() {
                if let Some(col) = widget.grid_col {
                    widget.grid_col = Some(col.min(f64::from(columns)));
                }
                if let Some(row) = widget.grid_row {
                    widget.grid_row = Some(row.min(f64::from(rows)));
                }
            }

            Some(((), notify))
        })
        .is_some()
    }

    /// Appends a widget entry and returns its uuid.
    ///
    /// A missing or already used uuid is replaced by a fresh one. In grid
    /// mode unset grid coordinates default to the grid center.
    pub fn add_widget(&self, id: &str, mut entry: WidgetEntry) -> Option<String> {
        self.mutate(|root| {
            let notify = root.is_active(id);
            let profile = root.profiles.get_mut(id)?;

            if entry.uuid.is_empty() || profile.widget(&entry.uuid).is_some() {
                entry.uuid = Uuid::new_v4().to_string();
            }

            if profile.mode() == PositionMode::Grid {
                let columns = f64::from(profile.columns());
                let rows = f64::from(profile.rows());
                entry.grid_col.get_or_insert(columns / 2.0);
                entry.grid_row.get_or_insert(rows / 2.0);
            }

            let uuid = entry.uuid.clone();
            debug!(%uuid, widget_type = %entry.widget_type, "widget added");
            profile.widgets_mut().push(entry);

            Some((uuid, notify))
        })
    }

    /// Removes a widget entry.
    pub fn remove_widget(&self, id: &str, uuid: &str) -> bool {
        self.mutate(|root| {
            let notify = root.is_active(id);
            let widgets = root.profiles.get_mut(id)?.widgets_mut();
            let index = widgets.iter().position(|w| w.uuid == uuid)?;
            widgets.remove(index);
            Some(((), notify))
        })
        .is_some()
    }

    /// Moves a widget entry to `new_index`, clamped to the end of the list.
    ///
    /// Moving an entry onto its current index is a no-op and returns false.
    pub fn reorder_widget(&self, id: &str, uuid: &str, new_index: usize) -> bool {
        self.mutate(|root| {
            let notify = root.is_active(id);
            let widgets = root.profiles.get_mut(id)?.widgets_mut();
            let old_index = widgets.iter().position(|w| w.uuid == uuid)?;
            let target = new_index.min(widgets.len() - 1);

            if target == old_index {
                return None;
            }

            let widget = widgets.remove(old_index);
            widgets.insert(target, widget);
            Some(((), notify))
        })
        .is_some()
    }

    /// Applies the fields set in `update` to a widget entry.
    pub fn update_widget_position(&self, id: &str, uuid: &str, update: &PositionUpdate) -> bool {
        self.mutate(|root| {
            let notify = root.is_active(id);
            root.profiles
                .get_mut(id)?
                .widget_mut(uuid)?
                .apply_position(update);
            Some(((), notify))
        })
        .is_some()
    }

    /// Merges `partial` into a widget's configuration, key by key.
    pub fn update_widget_config(&self, id: &str, uuid: &str, partial: &Map<String, Value>) -> bool {
        self.mutate(|root| {
            let notify = root.is_active(id);
            root.profiles
                .get_mut(id)?
                .widget_mut(uuid)?
                .merge_config(partial);
            Some(((), notify))
        })
        .is_some()
    }

    /// Writes a widget's position and replaces its configuration in one
    /// store operation, so subscribers see a single change.
    ///
    /// Keys missing from `config` are removed from the stored entry.
    pub fn save_widget(
        &self,
        id: &str,
        uuid: &str,
        update: &PositionUpdate,
        config: &Map<String, Value>,
    ) -> bool {
        self.mutate(|root| {
            let notify = root.is_active(id);
            let entry = root.profiles.get_mut(id)?.widget_mut(uuid)?;
            entry.apply_position(update);
            entry.config = config.clone();
            Some(((), notify))
        })
        .is_some()
    }

    /// Reacts to the stored value having changed.
    ///
    /// Values this store wrote itself are recognised and ignored.
    /// Anything else drops the cached root and notifies subscribers.
    /// Returns whether the cache was invalidated.
    pub fn handle_external_change(&self) -> bool {
        let current = self.inner.settings.get_string(PROFILES_KEY);

        {
            let mut state = self.inner.write_state();
            if current.is_some() && current == state.last_written {
                trace!("ignoring echo of own write");
                return false;
            }
            state.root = None;
            state.last_written = None;
        }

        info!("profiles changed externally");
        self.notify();
        true
    }

    /// Follows change announcements of the settings port in a background
    /// task, calling [`handle_external_change`](Self::handle_external_change)
    /// for the profiles key.
    ///
    /// Must be called from within a Tokio runtime. The task ends when the
    /// store is dropped.
    pub fn watch_external(&self) {
        let mut changes = self.inner.settings.subscribe_changes();
        let inner: Weak<StoreInner> = Arc::downgrade(&self.inner);

        let task = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(key) if key == PROFILES_KEY => {}
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "settings change notifications lagged");
                    }
                    Err(RecvError::Closed) => break,
                }

                let Some(inner) = inner.upgrade() else {
                    break;
                };
                ProfileStore { inner }.handle_external_change();
            }
        });

        let previous = self
            .inner
            .external_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn read<T>(&self, f: impl FnOnce(&ConfigRoot) -> T) -> T {
        {
            let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(root) = &state.root {
                return f(root);
            }
        }

        let mut state = self.inner.write_state();
        f(self.inner.ensure_loaded(&mut state))
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut ConfigRoot) -> Option<(T, bool)>) -> Option<T> {
        let (value, notify) = {
            let mut state = self.inner.write_state();
            let root = self.inner.ensure_loaded(&mut state);
            let (value, notify) = f(root)?;

            let root = root.clone();
            self.inner.persist(&root, &mut state.last_written);
            (value, notify)
        };

        if notify {
            self.notify();
        }
        Some(value)
    }

    fn notify(&self) {
        let delivered = self.inner.observers.notify();
        debug!(delivered, "profiles-changed dispatched");
    }
}

impl StoreInner {
    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_loaded<'a>(&self, state: &'a mut StoreState) -> &'a mut ConfigRoot {
        if state.root.is_none() {
            let root = self.read_persisted(&mut state.last_written);
            state.root = Some(root);
        }
        state
            .root
            .get_or_insert_with(ConfigRoot::with_default_profile)
    }

    #[instrument(skip_all)]
    fn read_persisted(&self, last_written: &mut Option<String>) -> ConfigRoot {
        let Some(json) = self
            .settings
            .get_string(PROFILES_KEY)
            .filter(|json| !json.trim().is_empty())
        else {
            debug!("no stored profiles, starting with the default profile");
            return ConfigRoot::with_default_profile();
        };

        let mut root: ConfigRoot = match serde_json::from_str(&json) {
            Ok(root) => root,
            Err(e) => {
                warn!(error = %e, "stored profiles are unreadable, resetting to the default profile");
                if let Err(e) = self.settings.set_string(PROFILES_BACKUP_KEY, &json) {
                    error!(error = %e, "failed to back up unreadable profiles");
                }
                return ConfigRoot::with_default_profile();
            }
        };

        if migrate(&mut root) {
            info!("stored profiles migrated");
            self.persist(&root, last_written);
        }

        debug!(profiles = root.profiles.len(), "profiles loaded");
        root
    }

    fn persist(&self, root: &ConfigRoot, last_written: &mut Option<String>) {
        let json = match serde_json::to_string(root) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize profiles");
                return;
            }
        };

        *last_written = Some(json.clone());
        if let Err(e) = self.settings.set_string(PROFILES_KEY, &json) {
            error!(error = %e, "failed to persist profiles");
        }
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        if let Some(task) = self
            .external_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}
