use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by settings backends.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Writing the settings file failed
    #[error("failed to persist settings to '{path}': {details}")]
    PersistenceError {
        /// File being written
        path: PathBuf,
        /// Underlying error
        details: String,
    },

    /// Settings could not be encoded
    #[error("failed to serialize settings: {details}")]
    SerializationError {
        /// Underlying error
        details: String,
    },

    /// Watching the settings file failed
    #[error("file watcher error for '{path}': {details}")]
    FileWatchError {
        /// File or directory being watched
        path: PathBuf,
        /// Underlying error
        details: String,
    },

    /// Lock was poisoned by a panicking writer
    #[error("failed to acquire {lock_type} lock: {details}")]
    LockError {
        /// Lock kind ("read" or "write")
        lock_type: String,
        /// Context
        details: String,
    },
}
