use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use futures::future::join_all;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use super::{
    BuiltinLoader, ModuleLoader, PluginError, PluginMetadata, PluginRecord, SettingsBuilder,
    WidgetFactory, metadata::read_metadata,
};

struct PluginEntry {
    record: PluginRecord,
    widget: OnceCell<Option<Arc<dyn WidgetFactory>>>,
    settings: OnceCell<Option<Arc<dyn SettingsBuilder>>>,
}

impl PluginEntry {
    fn new(record: PluginRecord) -> Self {
        Self {
            record,
            widget: OnceCell::new(),
            settings: OnceCell::new(),
        }
    }
}

/// Registry of the widget types found under a plugin root.
///
/// Implementations are loaded on first request and cached per type.
/// Concurrent first requests for the same type wait on a single load. A
/// failed load is logged, reported as `None` and retried on the next
/// request.
pub struct PluginCatalog {
    root: PathBuf,
    loader: Arc<dyn ModuleLoader>,
    plugins: RwLock<BTreeMap<String, Arc<PluginEntry>>>,
}

impl PluginCatalog {
    /// Empty catalog over `root`; call [`discover`](Self::discover) to
    /// populate it.
    pub fn new(root: impl Into<PathBuf>, loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            root: root.into(),
            loader,
            plugins: RwLock::new(BTreeMap::new()),
        }
    }

    /// Catalog using the built-in implementations.
    pub fn builtin(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Arc::new(BuiltinLoader))
    }

    /// Plugin root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rescans the plugin root, replacing everything known before.
    ///
    /// Every subdirectory is a plugin. A missing root yields an empty
    /// catalog. Directories that cannot be inspected are skipped. When two
    /// directories declare the same id, the first in name order wins.
    /// Returns the number of plugins found.
    ///
    /// # Errors
    /// Returns error if the root exists but cannot be listed
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn discover(&self) -> Result<usize, PluginError> {
        let dirs = match self.plugin_dirs().await {
            Ok(dirs) => dirs,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("plugin root does not exist");
                self.replace(BTreeMap::new());
                return Ok(0);
            }
            Err(e) => {
                return Err(PluginError::DiscoveryFailed {
                    path: self.root.clone(),
                    details: e.to_string(),
                });
            }
        };

        let records = join_all(dirs.into_iter().map(|(dir, name)| async move {
            let metadata = read_metadata(&dir, &name).await;
            PluginRecord { metadata, dir }
        }))
        .await;

        let mut plugins: BTreeMap<String, Arc<PluginEntry>> = BTreeMap::new();
        for record in records {
            let id = record.metadata.id.clone();
            if let Some(existing) = plugins.get(&id) {
                warn!(
                    plugin = %id,
                    kept = %existing.record.dir.display(),
                    ignored = %record.dir.display(),
                    "duplicate plugin id"
                );
                continue;
            }
            plugins.insert(id, Arc::new(PluginEntry::new(record)));
        }

        let count = plugins.len();
        self.replace(plugins);
        info!(count, "plugins discovered");
        Ok(count)
    }

    async fn plugin_dirs(&self) -> std::io::Result<Vec<(PathBuf, String)>> {
        let mut reader = tokio::fs::read_dir(&self.root).await?;
        let mut dirs = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            let path = entry.path();
            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => {}
                Ok(_) => continue,
                Err(e) => {
                    let error = PluginError::DiscoveryFailed {
                        path,
                        details: e.to_string(),
                    };
                    warn!(%error, "skipping plugin directory");
                    continue;
                }
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            dirs.push((path, name));
        }

        dirs.sort_by(|(_, a), (_, b)| a.cmp(b));
        Ok(dirs)
    }

    fn replace(&self, plugins: BTreeMap<String, Arc<PluginEntry>>) {
        *self.plugins.write().unwrap_or_else(PoisonError::into_inner) = plugins;
    }

    fn entry(&self, type_id: &str) -> Option<Arc<PluginEntry>> {
        self.plugins
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_id)
            .cloned()
    }

    /// Whether a plugin with this id was discovered.
    pub fn contains(&self, type_id: &str) -> bool {
        self.entry(type_id).is_some()
    }

    /// Metadata of a discovered plugin.
    pub fn get_metadata(&self, type_id: &str) -> Option<PluginMetadata> {
        self.entry(type_id).map(|entry| entry.record.metadata.clone())
    }

    /// Metadata of every discovered plugin, sorted by id.
    pub fn list_types(&self) -> Vec<PluginMetadata> {
        self.plugins
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|entry| entry.record.metadata.clone())
            .collect()
    }

    /// Widget factory of `type_id`, loading it on first use.
    ///
    /// `None` for unknown types, plugins without a widget module and
    /// failed loads.
    #[instrument(skip(self))]
    pub async fn get_factory(&self, type_id: &str) -> Option<Arc<dyn WidgetFactory>> {
        let entry = self.entry(type_id)?;

        let loaded = entry
            .widget
            .get_or_try_init(|| self.loader.load_widget(&entry.record))
            .await;

        match loaded {
            Ok(factory) => factory.clone(),
            Err(error) => {
                warn!(%error, "widget module unavailable");
                None
            }
        }
    }

    /// Settings builder of `type_id`, loading it on first use.
    ///
    /// Cached independently of the widget factory.
    #[instrument(skip(self))]
    pub async fn get_settings_builder(&self, type_id: &str) -> Option<Arc<dyn SettingsBuilder>> {
        let entry = self.entry(type_id)?;

        let loaded = entry
            .settings
            .get_or_try_init(|| self.loader.load_settings(&entry.record))
            .await;

        match loaded {
            Ok(builder) => builder.clone(),
            Err(error) => {
                warn!(%error, "settings module unavailable");
                None
            }
        }
    }
}

impl std::fmt::Debug for PluginCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCatalog")
            .field("root", &self.root)
            .field("types", &self.list_types().len())
            .finish_non_exhaustive()
    }
}
