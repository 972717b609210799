use thiserror::Error;

/// Errors raised while wiring the canvas to the profile store.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Renders triggered by store changes run on a Tokio runtime.
    #[error("canvas must be attached from within a Tokio runtime: {details}")]
    RuntimeUnavailable {
        /// Underlying error.
        details: String,
    },

    /// [`attach`](super::Canvas::attach) was called twice.
    #[error("canvas is already attached to the profile store")]
    AlreadyAttached,
}
