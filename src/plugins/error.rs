use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while discovering or loading plugins.
///
/// The catalog logs these and degrades: a directory that fails is
/// skipped and an implementation that fails to load is reported as absent.
#[derive(Error, Debug)]
pub enum PluginError {
    /// The plugin root could not be listed.
    #[error("failed to scan plugin directory '{path}': {details}")]
    DiscoveryFailed {
        /// Directory that was scanned.
        path: PathBuf,
        /// Underlying error.
        details: String,
    },

    /// A `plugin.json` could not be read or parsed.
    #[error("invalid plugin metadata in '{path}': {details}")]
    InvalidMetadata {
        /// Metadata file.
        path: PathBuf,
        /// Parser or I/O error.
        details: String,
    },

    /// A plugin declares an implementation the loader does not provide.
    #[error("no implementation available for plugin '{id}'")]
    UnknownImplementation {
        /// Plugin id.
        id: String,
    },

    /// Loading an implementation failed.
    #[error("failed to load {module} module of plugin '{id}': {details}")]
    LoadFailed {
        /// Plugin id.
        id: String,
        /// `widget` or `settings`.
        module: &'static str,
        /// Underlying error.
        details: String,
    },

    /// Writing plugin files failed.
    #[error("failed to write '{path}': {details}")]
    InstallFailed {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        details: String,
    },
}
