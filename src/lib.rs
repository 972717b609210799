//! Desktop widgets - profile-based layout engine for desktop widgets.
//!
//! Widgets such as clocks and text labels are grouped into named profiles.
//! Each profile positions its widgets either on a grid or by absolute
//! coordinates, and one profile is active at a time. The main pieces:
//!
//! - Persistent profile store with change notification and migration
//! - Plugin discovery with lazily loaded, cached widget modules
//! - Anchor-aware positioning that follows each widget's measured size
//! - Canvas controller that renders the active profile onto a surface
//! - CLI for managing profiles, widgets and plugins
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use desktop_widgets::{
//!     profiles::{ProfileStore, WidgetEntry},
//!     settings::MemorySettings,
//! };
//!
//! let store = ProfileStore::new(Arc::new(MemorySettings::new()));
//! let id = store.active_profile_id().unwrap_or_default();
//! let uuid = store.add_widget(&id, WidgetEntry::new("datetime"));
//! println!("added {uuid:?} to {id}");
//! ```

/// Canvas controller and rendering surfaces.
pub mod canvas;

/// Command-line interface for profile and widget management.
pub mod cli;

/// Shared reactive primitives.
pub mod common;

/// Application configuration schema and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Geometry, anchors and position computation.
pub mod layout;

/// Plugin discovery and module loading.
pub mod plugins;

/// Profile model, store and migration.
pub mod profiles;

/// Key-value settings backends.
pub mod settings;

/// Widget styling.
pub mod style;

/// Logging setup.
pub mod tracing_config;

/// Built-in widgets and settings forms.
pub mod widgets;

/// Re-exported core types for convenience.
pub use core::{Result, WidgetsError};
