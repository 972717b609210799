use std::{
    collections::HashMap,
    mem,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use futures::{StreamExt, future::join_all};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info, instrument, warn};

use super::{CanvasError, CanvasState, Surface};
use crate::{
    common::Property,
    layout::{Anchor, Point, Size, compute_target, resolve_anchor},
    plugins::PluginCatalog,
    profiles::{ObserverHandle, Profile, ProfileStore, WidgetEntry},
    style::Style,
    widgets::WidgetElement,
};

/// An element on the surface plus the task keeping it anchored.
struct ActiveWidget {
    element: Arc<dyn WidgetElement>,
    hook: JoinHandle<()>,
}

#[derive(Default)]
struct ActiveSet {
    generation: u64,
    attached: bool,
    subscription: Option<ObserverHandle>,
    widgets: HashMap<String, ActiveWidget>,
}

struct CanvasInner {
    store: ProfileStore,
    catalog: Arc<PluginCatalog>,
    surface: Arc<dyn Surface>,
    active: Mutex<ActiveSet>,
    state: Property<CanvasState>,
}

/// Renders the active profile onto a [`Surface`].
///
/// Every render tears down what is on the surface and instantiates the
/// active profile's widgets again, concurrently. Each pass takes a new
/// generation number; widgets finished by a pass that has since been
/// superseded are destroyed instead of tracked, so overlapping passes
/// never leave stray elements behind.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct Canvas {
    inner: Arc<CanvasInner>,
}

impl Canvas {
    /// Canvas drawing `store`'s active profile with `catalog`'s widgets.
    pub fn new(store: ProfileStore, catalog: Arc<PluginCatalog>, surface: Arc<dyn Surface>) -> Self {
        Self {
            inner: Arc::new(CanvasInner {
                store,
                catalog,
                surface,
                active: Mutex::new(ActiveSet::default()),
                state: Property::new(CanvasState::Empty),
            }),
        }
    }

    /// Current lifecycle state, watchable.
    pub fn state(&self) -> Property<CanvasState> {
        self.inner.state.clone()
    }

    /// Uuids of the widgets currently on the surface, sorted.
    pub fn active_widgets(&self) -> Vec<String> {
        let mut uuids: Vec<String> = self.inner.lock().widgets.keys().cloned().collect();
        uuids.sort();
        uuids
    }

    /// Element shown for `uuid`.
    pub fn element(&self, uuid: &str) -> Option<Arc<dyn WidgetElement>> {
        self.inner
            .lock()
            .widgets
            .get(uuid)
            .map(|active| active.element.clone())
    }

    /// Subscribes to the store and renders once. From then on every
    /// `profiles-changed` triggers a render on the current runtime.
    ///
    /// # Errors
    /// Returns error if called outside a Tokio runtime or twice
    pub async fn attach(&self) -> Result<(), CanvasError> {
        let runtime = Handle::try_current().map_err(|e| CanvasError::RuntimeUnavailable {
            details: e.to_string(),
        })?;

        {
            let mut active = self.inner.lock();
            if active.attached {
                return Err(CanvasError::AlreadyAttached);
            }
            active.attached = true;
        }

        let weak: Weak<CanvasInner> = Arc::downgrade(&self.inner);
        let handle = self.inner.store.subscribe(move || {
            let Some(inner) = weak.upgrade() else {
                return Ok(());
            };
            let Some(generation) = inner.begin(true) else {
                return Ok(());
            };
            runtime.spawn(async move { inner.populate(generation).await });
            Ok(())
        });
        self.inner.lock().subscription = Some(handle);

        info!("canvas attached");
        self.render().await;
        Ok(())
    }

    /// Unsubscribes from the store and clears the surface.
    pub fn detach(&self) {
        let (subscription, stale) = {
            let mut active = self.inner.lock();
            active.attached = false;
            active.generation += 1;
            (active.subscription.take(), mem::take(&mut active.widgets))
        };

        if let Some(handle) = subscription {
            self.inner.store.unsubscribe(handle);
        }
        self.inner.teardown(stale);
        self.inner.state.set(CanvasState::Empty);
        info!("canvas detached");
    }

    /// Runs a render pass and waits for it to settle.
    pub async fn render(&self) {
        if let Some(generation) = self.inner.begin(false) {
            self.inner.populate(generation).await;
        }
    }
}

impl CanvasInner {
    fn lock(&self) -> MutexGuard<'_, ActiveSet> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a pass: takes a new generation and clears the surface.
    /// With `only_attached`, does nothing once the canvas is detached.
    fn begin(&self, only_attached: bool) -> Option<u64> {
        let (generation, stale) = {
            let mut active = self.lock();
            if only_attached && !active.attached {
                return None;
            }
            active.generation += 1;
            (active.generation, mem::take(&mut active.widgets))
        };

        self.state.set(CanvasState::Rendering);
        self.teardown(stale);
        Some(generation)
    }

    #[instrument(skip(self))]
    async fn populate(&self, generation: u64) {
        let Some((profile_id, profile)) = self.store.active_profile() else {
            debug!("no active profile");
            self.settle(generation, CanvasState::Empty);
            return;
        };

        if profile.widgets().is_empty() {
            debug!(profile = %profile_id, "active profile has no widgets");
            self.settle(generation, CanvasState::Empty);
            return;
        }

        let screen = self.surface.screen_size();
        let placed = join_all(
            profile
                .widgets()
                .iter()
                .map(|entry| self.instantiate(generation, entry, &profile, screen)),
        )
        .await
        .into_iter()
        .filter(|placed| *placed)
        .count();

        if self.settle(generation, CanvasState::Rendered) {
            info!(profile = %profile_id, placed, total = profile.widgets().len(), "canvas rendered");
        }
    }

    /// Creates, styles and attaches one widget. Returns whether it is now
    /// tracked.
    async fn instantiate(
        &self,
        generation: u64,
        entry: &WidgetEntry,
        profile: &Profile,
        screen: Size,
    ) -> bool {
        let Some(factory) = self.catalog.get_factory(&entry.widget_type).await else {
            warn!(widget = %entry.uuid, widget_type = %entry.widget_type, "no factory for widget type, skipping");
            return false;
        };

        let element = match factory.create(&entry.config) {
            Ok(element) => element,
            Err(error) => {
                warn!(widget = %entry.uuid, %error, "widget creation failed, skipping");
                return false;
            }
        };

        element.apply_style(&Style::resolve(entry.style_override()));

        let plugin_anchor = self
            .catalog
            .get_metadata(&entry.widget_type)
            .and_then(|metadata| metadata.anchor);
        let anchor = resolve_anchor(entry, plugin_anchor.as_ref());
        let target = compute_target(entry, profile, screen);

        self.surface.attach(&entry.uuid, element.clone());
        let hook = spawn_anchor_hook(&element, anchor, target);

        let widget = ActiveWidget { element, hook };
        let (tracked, stale) = {
            let mut active = self.lock();
            if active.generation == generation {
                (true, active.widgets.insert(entry.uuid.clone(), widget))
            } else {
                (false, Some(widget))
            }
        };

        if let Some(stale) = stale {
            debug!(widget = %entry.uuid, tracked, "discarding replaced or superseded element");
            self.teardown_one(stale);
        }
        tracked
    }

    /// Sets the final state of a pass unless a newer pass started.
    fn settle(&self, generation: u64, state: CanvasState) -> bool {
        let active = self.lock();
        if active.generation != generation {
            return false;
        }
        self.state.set(state);
        true
    }

    fn teardown(&self, widgets: HashMap<String, ActiveWidget>) {
        for (_, widget) in widgets {
            self.teardown_one(widget);
        }
    }

    fn teardown_one(&self, widget: ActiveWidget) {
        widget.hook.abort();
        self.surface.detach(&widget.element);
        widget.element.destroy();
    }
}

/// Keeps `element`'s anchor on `target` as its measured size changes.
fn spawn_anchor_hook(element: &Arc<dyn WidgetElement>, anchor: Anchor, target: Point) -> JoinHandle<()> {
    let mut sizes = element.size().watch();
    let element = Arc::downgrade(element);

    tokio::spawn(async move {
        while let Some(size) = sizes.next().await {
            if size.is_unmeasured() {
                continue;
            }
            let Some(element) = element.upgrade() else {
                break;
            };
            element.set_position(anchor.apply(target, size));
        }
    })
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("state", &self.inner.state.get())
            .field("widgets", &self.active_widgets())
            .finish_non_exhaustive()
    }
}
