//! Unit tests for the profile model and store

#![allow(clippy::unwrap_used)]

mod observers;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    profiles::{ProfileStore, WidgetEntry},
    settings::MemorySettings,
};

/// Store over fresh in-memory settings.
fn memory_store() -> (ProfileStore, Arc<MemorySettings>) {
    let settings = Arc::new(MemorySettings::new());
    (ProfileStore::new(settings.clone()), settings)
}

/// Counter incremented by every `profiles-changed`.
fn count_notifications(store: &ProfileStore) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    store.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    count
}

fn text_widget() -> WidgetEntry {
    WidgetEntry::new("customtext")
}
