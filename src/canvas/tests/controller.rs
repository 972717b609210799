use std::{fs, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use super::{SCREEN, close, fixture, placed_where, settled};
use crate::{
    canvas::{Canvas, CanvasError, CanvasState, HeadlessSurface},
    layout::{Point, Size},
    plugins::{ModuleLoader, PluginCatalog, PluginError, PluginRecord, SettingsBuilder, WidgetFactory},
    profiles::{ProfileStore, WidgetEntry},
    settings::MemorySettings,
    widgets::CustomTextFactory,
};

fn text_widget(text: &str) -> WidgetEntry {
    let config = json!({ "text": text });
    WidgetEntry::new("customtext").with_config(config.as_object().cloned().unwrap())
}

#[tokio::test]
async fn profile_without_widgets_renders_empty() {
    let f = fixture().await;

    f.canvas.render().await;

    assert_eq!(f.canvas.state().get(), CanvasState::Empty);
    assert!(f.surface.is_empty());
}

#[tokio::test]
async fn widgets_are_attached_and_anchored() {
    let f = fixture().await;
    let profile = f.store.active_profile_id().unwrap();
    let uuid = f.store.add_widget(&profile, text_widget("Hello")).unwrap();

    f.canvas.render().await;

    assert_eq!(f.canvas.state().get(), CanvasState::Rendered);
    assert_eq!(f.canvas.active_widgets(), vec![uuid.clone()]);

    let element = f.canvas.element(&uuid).unwrap();
    let position = placed_where(&element, |_| true).await;

    // "Hello" at 32px with 12px padding, centered on (600, 400).
    let size = element.size().get();
    assert!(close(position, Point::new(600.0 - size.width / 2.0, 400.0 - size.height / 2.0)));

    let placements = f.surface.placements();
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].uuid, uuid);
    assert_eq!(placements[0].text, "Hello");
}

#[tokio::test]
async fn size_changes_reapply_the_anchor() {
    let f = fixture().await;
    let profile = f.store.active_profile_id().unwrap();
    let uuid = f.store.add_widget(&profile, text_widget("Hello")).unwrap();
    f.canvas.render().await;

    let element = f.canvas.element(&uuid).unwrap();
    placed_where(&element, |_| true).await;

    element.size().set(Size::new(100.0, 50.0));

    placed_where(&element, |p| close(p, Point::new(550.0, 375.0))).await;
}

#[tokio::test]
async fn plugin_default_anchor_applies() {
    let f = fixture().await;
    let profile = f.store.active_profile_id().unwrap();
    let uuid = f.store.add_widget(&profile, WidgetEntry::new("corner")).unwrap();
    f.canvas.render().await;

    let element = f.canvas.element(&uuid).unwrap();

    placed_where(&element, |p| close(p, Point::new(600.0, 400.0))).await;
}

#[tokio::test]
async fn style_override_is_applied() {
    let f = fixture().await;
    let profile = f.store.active_profile_id().unwrap();
    let entry = WidgetEntry::new("customtext")
        .with_config(json!({ "style": { "fontSize": 20 } }).as_object().cloned().unwrap());
    let uuid = f.store.add_widget(&profile, entry).unwrap();

    f.canvas.render().await;

    let element = f.canvas.element(&uuid).unwrap();
    assert_eq!(element.style().font_size, 20.0);
}

#[tokio::test]
async fn unknown_types_are_skipped() {
    let f = fixture().await;
    let profile = f.store.active_profile_id().unwrap();
    f.store.add_widget(&profile, WidgetEntry::new("missing")).unwrap();
    let uuid = f.store.add_widget(&profile, text_widget("kept")).unwrap();

    f.canvas.render().await;

    assert_eq!(f.canvas.state().get(), CanvasState::Rendered);
    assert_eq!(f.canvas.active_widgets(), vec![uuid]);
}

#[tokio::test]
async fn rerender_tears_down_previous_elements() {
    let f = fixture().await;
    let profile = f.store.active_profile_id().unwrap();
    let uuid = f.store.add_widget(&profile, text_widget("Hello")).unwrap();
    f.canvas.render().await;

    let old = f.canvas.element(&uuid).unwrap();
    let old_position = placed_where(&old, |_| true).await;

    f.canvas.render().await;

    assert!(old.is_destroyed());
    assert_eq!(f.surface.len(), 1);
    assert!(!Arc::ptr_eq(&old, &f.canvas.element(&uuid).unwrap()));

    // The old resize hook is gone: resizing no longer moves the element.
    old.size().set(Size::new(10.0, 10.0));
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(old.position(), Some(old_position));
}

mod attached {
    use super::*;

    #[tokio::test]
    async fn store_changes_trigger_renders() {
        let f = fixture().await;
        f.canvas.attach().await.unwrap();
        assert_eq!(f.canvas.state().get(), CanvasState::Empty);

        let profile = f.store.active_profile_id().unwrap();
        let uuid = f.store.add_widget(&profile, text_widget("live")).unwrap();

        assert_eq!(settled(&f.canvas).await, CanvasState::Rendered);
        assert_eq!(f.canvas.active_widgets(), vec![uuid.clone()]);

        f.store.remove_widget(&profile, &uuid);

        assert_eq!(settled(&f.canvas).await, CanvasState::Empty);
        assert!(f.surface.is_empty());
    }

    #[tokio::test]
    async fn switching_profiles_replaces_widgets() {
        let f = fixture().await;
        let first = f.store.active_profile_id().unwrap();
        f.store.add_widget(&first, text_widget("first")).unwrap();
        let second = f.store.create_profile("Second");
        let kept = f.store.add_widget(&second, text_widget("second")).unwrap();

        f.canvas.attach().await.unwrap();
        assert_eq!(f.surface.placements()[0].text, "first");

        f.store.set_active_profile(&second);

        settled(&f.canvas).await;
        assert_eq!(f.canvas.active_widgets(), vec![kept]);
        assert_eq!(f.surface.placements()[0].text, "second");
    }

    #[tokio::test]
    async fn detach_clears_and_stops_listening() {
        let f = fixture().await;
        let profile = f.store.active_profile_id().unwrap();
        f.store.add_widget(&profile, text_widget("bye")).unwrap();
        f.canvas.attach().await.unwrap();
        assert_eq!(f.surface.len(), 1);

        f.canvas.detach();

        assert!(f.surface.is_empty());
        assert_eq!(f.canvas.state().get(), CanvasState::Empty);

        f.store.add_widget(&profile, text_widget("ignored")).unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(f.surface.is_empty());
    }

    #[tokio::test]
    async fn attaching_twice_fails() {
        let f = fixture().await;
        f.canvas.attach().await.unwrap();

        assert!(matches!(f.canvas.attach().await, Err(CanvasError::AlreadyAttached)));
    }

    #[test]
    fn attaching_outside_a_runtime_fails() {
        let canvas = Canvas::new(
            ProfileStore::new(Arc::new(MemorySettings::new())),
            Arc::new(PluginCatalog::builtin("/nonexistent")),
            Arc::new(HeadlessSurface::new(SCREEN)),
        );

        let result = futures::executor::block_on(canvas.attach());

        assert!(matches!(result, Err(CanvasError::RuntimeUnavailable { .. })));
    }
}

/// Loader whose widget module takes a while to load.
struct SlowLoader;

#[async_trait]
impl ModuleLoader for SlowLoader {
    async fn load_widget(
        &self,
        _record: &PluginRecord,
    ) -> Result<Option<Arc<dyn WidgetFactory>>, PluginError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Some(Arc::new(CustomTextFactory)))
    }

    async fn load_settings(
        &self,
        _record: &PluginRecord,
    ) -> Result<Option<Arc<dyn SettingsBuilder>>, PluginError> {
        Ok(None)
    }
}

#[tokio::test]
async fn overlapping_renders_keep_only_the_latest() {
    let plugins = TempDir::new().unwrap();
    fs::create_dir_all(plugins.path().join("slow")).unwrap();
    let catalog = Arc::new(PluginCatalog::new(plugins.path(), Arc::new(SlowLoader)));
    catalog.discover().await.unwrap();

    let store = ProfileStore::new(Arc::new(MemorySettings::new()));
    let first = store.active_profile_id().unwrap();
    store.add_widget(&first, WidgetEntry::new("slow")).unwrap();
    let second = store.create_profile("Second");
    let latest = store.add_widget(&second, WidgetEntry::new("slow")).unwrap();

    let surface = Arc::new(HeadlessSurface::new(SCREEN));
    let canvas = Canvas::new(store.clone(), catalog, surface.clone());

    let stale = tokio::spawn({
        let canvas = canvas.clone();
        async move { canvas.render().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    store.set_active_profile(&second);
    canvas.render().await;
    stale.await.unwrap();

    assert_eq!(canvas.active_widgets(), vec![latest.clone()]);
    assert_eq!(surface.len(), 1);
    assert_eq!(surface.placements()[0].uuid, latest);
    assert_eq!(canvas.state().get(), CanvasState::Rendered);
}
