use std::fmt;

/// Lifecycle of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasState {
    /// Nothing to show: no active profile or no widgets.
    #[default]
    Empty,
    /// A render pass is instantiating widgets.
    Rendering,
    /// The latest render pass has finished.
    Rendered,
}

impl fmt::Display for CanvasState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CanvasState::Empty => "empty",
            CanvasState::Rendering => "rendering",
            CanvasState::Rendered => "rendered",
        };
        f.write_str(name)
    }
}
