use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::profiles::{ObserverHandle, ObserverRegistry};

#[test]
fn notify_reaches_every_subscriber() {
    let registry = ObserverRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = calls.clone();
        registry.subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }

    assert_eq!(registry.notify(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn unsubscribe_stops_delivery() {
    let registry = ObserverRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let handle = registry.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(registry.unsubscribe(handle));
    assert!(!registry.unsubscribe(handle));
    registry.notify();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(registry.is_empty());
}

#[test]
fn failing_observer_does_not_block_others() {
    let registry = ObserverRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));

    registry.subscribe(|| Err("boom".into()));
    let counter = calls.clone();
    registry.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert_eq!(registry.notify(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
#[allow(clippy::panic)]
fn panicking_observer_is_isolated() {
    let registry = ObserverRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));

    registry.subscribe(|| panic!("observer bug"));
    let counter = calls.clone();
    registry.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert_eq!(registry.notify(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn observer_may_unsubscribe_itself_during_dispatch() {
    let registry = Arc::new(ObserverRegistry::new());
    let own_handle: Arc<Mutex<Option<ObserverHandle>>> = Arc::new(Mutex::new(None));
    let calls = Arc::new(AtomicUsize::new(0));

    let handle = {
        let registry = registry.clone();
        let own_handle = own_handle.clone();
        let calls = calls.clone();
        registry.clone().subscribe(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            if let Some(handle) = own_handle.lock().unwrap().take() {
                registry.unsubscribe(handle);
            }
            Ok(())
        })
    };
    *own_handle.lock().unwrap() = Some(handle);

    let later = Arc::new(AtomicUsize::new(0));
    let counter = later.clone();
    registry.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert_eq!(registry.notify(), 2);
    assert_eq!(registry.notify(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(later.load(Ordering::SeqCst), 2);
}
