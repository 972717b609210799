use std::{
    error::Error,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use tracing::error;

/// Outcome of an observer callback.
pub type ObserverResult = Result<(), Box<dyn Error + Send + Sync>>;

type Callback = Arc<dyn Fn() -> ObserverResult + Send + Sync>;

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

/// Subscribers of the `profiles-changed` notification.
///
/// Dispatch works on a snapshot of the subscriber list, so callbacks may
/// subscribe or unsubscribe (themselves included) while being notified.
/// A callback that fails or panics is logged and the rest still run.
pub struct ObserverRegistry {
    next_id: AtomicU64,
    observers: Mutex<Vec<(ObserverHandle, Callback)>>,
}

impl ObserverRegistry {
    /// Registry without subscribers.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Adds a subscriber.
    pub fn subscribe<F>(&self, callback: F) -> ObserverHandle
    where
        F: Fn() -> ObserverResult + Send + Sync + 'static,
    {
        let handle = ObserverHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((handle, Arc::new(callback)));
        handle
    }

    /// Removes a subscriber. Returns false if the handle was unknown.
    pub fn unsubscribe(&self, handle: ObserverHandle) -> bool {
        let mut observers = self.lock();
        let before = observers.len();
        observers.retain(|(h, _)| *h != handle);
        observers.len() != before
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every subscriber once. Returns how many completed without error.
    pub fn notify(&self) -> usize {
        let snapshot: Vec<(ObserverHandle, Callback)> = self.lock().clone();

        snapshot
            .into_iter()
            .filter(|(handle, callback)| {
                match catch_unwind(AssertUnwindSafe(|| callback())) {
                    Ok(Ok(())) => true,
                    Ok(Err(e)) => {
                        error!(observer = handle.0, error = %e, "profiles-changed observer failed");
                        false
                    }
                    Err(_) => {
                        error!(observer = handle.0, "profiles-changed observer panicked");
                        false
                    }
                }
            })
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(ObserverHandle, Callback)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
