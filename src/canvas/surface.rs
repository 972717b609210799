use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tracing::trace;

use crate::{
    layout::{Point, Size},
    style::Style,
    widgets::WidgetElement,
};

/// Host container elements are placed on.
///
/// Surfaces own layout: after [`attach`](Surface::attach) they must
/// eventually publish the element's measured size through
/// [`WidgetElement::size`].
pub trait Surface: Send + Sync {
    /// Size of the area widgets are laid out on.
    fn screen_size(&self) -> Size;

    /// Adds an element.
    fn attach(&self, uuid: &str, element: Arc<dyn WidgetElement>);

    /// Removes an element. Unknown elements are ignored.
    fn detach(&self, element: &Arc<dyn WidgetElement>);
}

/// Approximate rendered size of `text` in `style`.
///
/// Glyphs are taken as `0.6·fontSize` wide and lines as `1.2·fontSize`
/// tall, plus padding on both sides.
pub fn estimate_size(text: &str, style: &Style) -> Size {
    let lines: Vec<&str> = text.split('\n').collect();
    let longest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    Size::new(
        longest as f64 * 0.6 * style.font_size + 2.0 * style.padding,
        lines.len() as f64 * 1.2 * style.font_size + 2.0 * style.padding,
    )
}

/// One element as seen by a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Widget uuid the element was attached under.
    pub uuid: String,
    /// Plugin type of the element.
    pub widget_type: String,
    /// Displayed text.
    pub text: String,
    /// Measured size.
    pub size: Size,
    /// Top-left corner, once placed.
    pub position: Option<Point>,
}

/// Surface without a display.
///
/// Records attached elements and measures them with [`estimate_size`].
/// Inside a Tokio runtime the measurement is published from a spawned
/// task, like a real toolkit reporting size after its layout pass;
/// otherwise it is published immediately.
pub struct HeadlessSurface {
    screen: Size,
    elements: Mutex<Vec<(String, Arc<dyn WidgetElement>)>>,
}

impl HeadlessSurface {
    /// Surface covering a `screen`-sized area.
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            elements: Mutex::new(Vec::new()),
        }
    }

    /// Attached elements in attach order.
    pub fn placements(&self) -> Vec<Placement> {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(uuid, element)| Placement {
                uuid: uuid.clone(),
                widget_type: element.widget_type().to_string(),
                text: element.text(),
                size: element.size().get(),
                position: element.position(),
            })
            .collect()
    }

    /// Number of attached elements.
    pub fn len(&self) -> usize {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Surface for HeadlessSurface {
    fn screen_size(&self) -> Size {
        self.screen
    }

    fn attach(&self, uuid: &str, element: Arc<dyn WidgetElement>) {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((uuid.to_string(), element.clone()));

        let measure = move || {
            let size = estimate_size(&element.text(), &element.style());
            trace!(width = size.width, height = size.height, "element measured");
            element.size().set(size);
        };

        match Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move { measure() });
            }
            Err(_) => measure(),
        }
    }

    fn detach(&self, element: &Arc<dyn WidgetElement>) {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(_, attached)| !Arc::ptr_eq(attached, element));
    }
}

impl std::fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("screen", &self.screen)
            .field("elements", &self.len())
            .finish()
    }
}
