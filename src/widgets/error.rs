use thiserror::Error;

/// Errors raised while creating a widget element.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// A config field holds a value the widget cannot use.
    #[error("invalid '{field}' for {widget} widget: {details}")]
    InvalidConfig {
        /// Widget type being created.
        widget: String,
        /// Offending config key.
        field: String,
        /// What was wrong with it.
        details: String,
    },
}
