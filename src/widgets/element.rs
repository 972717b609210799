use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use tokio::task::JoinHandle;
use tracing::trace;

use super::{WidgetElement, text::process_escape_sequences};
use crate::{
    common::Property,
    layout::{Point, Size},
    style::{Align, Style},
};

/// Inline CSS applied to an element's two nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementCss {
    /// Container node: background, border, shadow, spacing.
    pub container: String,
    /// Text node: font, color, text shadow.
    pub text: String,
}

/// A styled text label inside a container, the element both built-in
/// widgets produce.
///
/// The element does not lay itself out. Its [`size`](WidgetElement::size)
/// stays zero until the surface it is attached to measures it.
pub struct TextElement {
    widget_type: String,
    text: Property<String>,
    size: Property<Size>,
    position: Mutex<Option<Point>>,
    style: Mutex<Style>,
    css: Mutex<ElementCss>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
    destroyed: AtomicBool,
}

impl TextElement {
    /// Unstyled element showing `text` as given.
    pub fn new(widget_type: impl Into<String>, text: impl Into<String>) -> Self {
        let style = Style::default();
        let css = ElementCss {
            container: style.container_css(),
            text: style.text_css(),
        };

        Self {
            widget_type: widget_type.into(),
            text: Property::new(text.into()),
            size: Property::new(Size::default()),
            position: Mutex::new(None),
            style: Mutex::new(style),
            css: Mutex::new(css),
            refresh_task: Mutex::new(None),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Replaces the displayed text verbatim.
    pub fn set_text(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    /// The displayed text as a watchable property.
    pub fn text_property(&self) -> Property<String> {
        self.text.clone()
    }

    /// CSS currently applied.
    pub fn css(&self) -> ElementCss {
        self.css.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Alignment of the label inside the container.
    pub fn alignment(&self) -> Align {
        Align::from(self.style().text_align)
    }

    /// Hands ownership of a background refresh task to the element; it is
    /// aborted on [`destroy`](WidgetElement::destroy).
    pub(crate) fn set_refresh_task(&self, task: JoinHandle<()>) {
        let previous = self
            .refresh_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl WidgetElement for TextElement {
    fn widget_type(&self) -> &str {
        &self.widget_type
    }

    fn text(&self) -> String {
        self.text.get()
    }

    fn update_text(&self, text: &str) {
        self.set_text(process_escape_sequences(text));
    }

    fn apply_style(&self, style: &Style) {
        let css = ElementCss {
            container: style.container_css(),
            text: style.text_css(),
        };
        trace!(widget_type = %self.widget_type, container = %css.container, text = %css.text, "style applied");

        *self.style.lock().unwrap_or_else(PoisonError::into_inner) = style.clone();
        *self.css.lock().unwrap_or_else(PoisonError::into_inner) = css;
    }

    fn style(&self) -> Style {
        self.style.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn size(&self) -> Property<Size> {
        self.size.clone()
    }

    fn set_position(&self, position: Point) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = Some(position);
    }

    fn position(&self) -> Option<Point> {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(task) = self
            .refresh_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl Drop for TextElement {
    fn drop(&mut self) {
        if let Some(task) = self
            .refresh_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}
