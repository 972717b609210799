use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, recommended_watcher};
use tokio::sync::mpsc;

use super::SettingsError;

/// A file system event for a path inside a watched directory.
#[derive(Debug, Clone)]
pub struct FileEvent {
    /// The path of the file that changed
    pub path: PathBuf,
    /// The type of change that occurred
    pub kind: FileEventKind,
}

/// The type of file system change that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    /// File was modified
    Modified,
    /// File was created, including by an atomic rename onto it
    Created,
    /// File was removed
    Removed,
}

/// Directory watcher feeding a Tokio channel.
///
/// Settings files are replaced by rename, which invalidates a watch on
/// the file itself, so the parent directory is watched instead and
/// callers filter events by path.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    watched_dirs: HashSet<PathBuf>,
}

impl FileWatcher {
    /// Creates a watcher and the receiver its events are delivered to.
    ///
    /// The channel is unbounded since file events are infrequent but bursty.
    ///
    /// # Errors
    /// Returns error if the underlying file system watcher cannot be initialized.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<FileEvent>), SettingsError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let watcher = recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };

            let kind = match event.kind {
                EventKind::Create(_) => FileEventKind::Created,
                EventKind::Modify(_) => FileEventKind::Modified,
                EventKind::Remove(_) => FileEventKind::Removed,
                _ => return,
            };

            for path in event.paths {
                let _ = event_tx.send(FileEvent { path, kind });
            }
        })
        .map_err(|e| SettingsError::FileWatchError {
            path: PathBuf::new(),
            details: e.to_string(),
        })?;

        Ok((
            Self {
                watcher,
                watched_dirs: HashSet::new(),
            },
            event_rx,
        ))
    }

    /// Starts watching `dir`. Watching the same directory twice is a no-op.
    ///
    /// # Errors
    /// Returns error if the directory cannot be resolved or watched.
    pub fn watch_dir(&mut self, dir: &Path) -> Result<(), SettingsError> {
        let watch_error = |e: &dyn std::fmt::Display| SettingsError::FileWatchError {
            path: dir.to_path_buf(),
            details: e.to_string(),
        };

        let canonical = dir.canonicalize().map_err(|e| watch_error(&e))?;
        if self.watched_dirs.contains(&canonical) {
            return Ok(());
        }

        self.watcher
            .watch(&canonical, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(&e))?;
        self.watched_dirs.insert(canonical);

        Ok(())
    }
}
