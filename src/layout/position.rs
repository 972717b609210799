use super::{Anchor, AnchorSpec, Point, Size};
use crate::profiles::{PositionMode, Profile, WidgetEntry};

/// Coordinate used for an unset `x` or `y` in coordinate mode.
pub const DEFAULT_COORDINATE: f64 = 100.0;

/// Screen point the widget's anchor should land on.
///
/// In grid mode the screen is split into `gridColumns`×`gridRows` cells
/// and `gridCol`/`gridRow` are cell coordinates; unset values mean the
/// grid center. In coordinate mode `x`/`y` are pixels. Only the fields of
/// the profile's current mode are read.
pub fn compute_target(entry: &WidgetEntry, profile: &Profile, screen: Size) -> Point {
    match profile.mode() {
        PositionMode::Grid => {
            let columns = f64::from(profile.columns());
            let rows = f64::from(profile.rows());
            let cell_width = screen.width / columns;
            let cell_height = screen.height / rows;

            let col = entry.grid_col.unwrap_or(columns / 2.0);
            let row = entry.grid_row.unwrap_or(rows / 2.0);

            Point::new(col * cell_width, row * cell_height)
        }
        PositionMode::Coordinate => Point::new(
            entry.x.unwrap_or(DEFAULT_COORDINATE),
            entry.y.unwrap_or(DEFAULT_COORDINATE),
        ),
    }
}

/// Widget anchor, then the plugin default, then `center-center`.
pub fn resolve_anchor(entry: &WidgetEntry, plugin_default: Option<&AnchorSpec>) -> Anchor {
    entry
        .anchor
        .as_ref()
        .filter(|spec| !spec.is_blank())
        .or(plugin_default.filter(|spec| !spec.is_blank()))
        .map(AnchorSpec::resolve)
        .unwrap_or(Anchor::CENTER_CENTER)
}

/// Final top-left position of a measured element.
pub fn compute_position(
    entry: &WidgetEntry,
    profile: &Profile,
    screen: Size,
    size: Size,
    plugin_default: Option<&AnchorSpec>,
) -> Point {
    let target = compute_target(entry, profile, screen);
    resolve_anchor(entry, plugin_default).apply(target, size)
}
