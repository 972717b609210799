//! Unit tests for the canvas controller and headless surface

#![allow(clippy::unwrap_used)]

mod controller;

use std::{fs, sync::Arc, time::Duration};

use tempfile::TempDir;

use super::{Canvas, CanvasState, HeadlessSurface};
use crate::{
    layout::{Point, Size},
    plugins::{PluginCatalog, install_builtin_plugins},
    profiles::ProfileStore,
    settings::MemorySettings,
    widgets::WidgetElement,
};

const SCREEN: Size = Size::new(1200.0, 800.0);

struct Fixture {
    _plugins: TempDir,
    store: ProfileStore,
    surface: Arc<HeadlessSurface>,
    canvas: Canvas,
}

/// Canvas over the built-in plugins, a fresh store and a 1200×800 surface.
async fn fixture() -> Fixture {
    let plugins = TempDir::new().unwrap();
    install_builtin_plugins(plugins.path()).await.unwrap();

    let corner = plugins.path().join("corner");
    fs::create_dir_all(&corner).unwrap();
    fs::write(
        corner.join("plugin.json"),
        r#"{"id":"corner","name":"Corner","anchor":"top-left"}"#,
    )
    .unwrap();
    fs::write(corner.join("widget.toml"), "implementation = \"customtext\"\n").unwrap();

    let catalog = Arc::new(PluginCatalog::builtin(plugins.path()));
    catalog.discover().await.unwrap();

    let store = ProfileStore::new(Arc::new(MemorySettings::new()));
    let surface = Arc::new(HeadlessSurface::new(SCREEN));
    let canvas = Canvas::new(store.clone(), catalog, surface.clone());

    Fixture {
        _plugins: plugins,
        store,
        surface,
        canvas,
    }
}

/// Waits until the canvas is no longer rendering.
async fn settled(canvas: &Canvas) -> CanvasState {
    tokio::time::timeout(
        Duration::from_secs(2),
        canvas.state().wait_for(|state| *state != CanvasState::Rendering),
    )
    .await
    .unwrap()
}

/// Waits until the element's position satisfies `predicate`.
async fn placed_where(element: &Arc<dyn WidgetElement>, predicate: impl Fn(Point) -> bool) -> Point {
    for _ in 0..200 {
        if let Some(position) = element.position().filter(|p| predicate(*p)) {
            return position;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("element was never placed as expected: {:?}", element.position());
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}
