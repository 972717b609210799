//! Rendering the active profile.
//!
//! The [`Canvas`] listens for `profiles-changed` and redraws the active
//! profile onto a [`Surface`]: it resolves each widget's factory through
//! the plugin catalog, styles the element, attaches it and keeps it
//! anchored while the surface measures it. [`HeadlessSurface`] stands in
//! for a display in tests and for `canvas preview`.

mod controller;
mod error;
mod state;
mod surface;

#[cfg(test)]
mod tests;

pub use controller::Canvas;
pub use error::CanvasError;
pub use state::CanvasState;
pub use surface::{HeadlessSurface, Placement, Surface, estimate_size};
