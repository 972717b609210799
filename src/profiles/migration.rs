use tracing::debug;

use super::model::{ConfigRoot, PositionMode};

/// Fills fields that older versions did not store.
///
/// Every profile ends up with a position mode (grid), grid dimensions
/// (6×4) and a widget list (empty). Stored grid dimensions of zero or
/// outside `[GRID_MIN, GRID_MAX]` are replaced by what the profile reads
/// as. Running this twice changes nothing the second time.
///
/// Returns whether anything was filled in or normalized.
pub fn migrate(root: &mut ConfigRoot) -> bool {
    let mut changed = false;

    for profile in root.profiles.values_mut() {
        if profile.position_mode.is_none() {
            profile.position_mode = Some(PositionMode::Grid);
            changed = true;
        }
        let columns = profile.columns();
        if profile.grid_columns != Some(columns) {
            profile.grid_columns = Some(columns);
            changed = true;
        }
        let rows = profile.rows();
        if profile.grid_rows != Some(rows) {
            profile.grid_rows = Some(rows);
            changed = true;
        }
        if profile.widgets.is_none() {
            profile.widgets = Some(Vec::new());
            changed = true;
        }
    }

    if changed {
        debug!("filled missing profile fields");
    }

    changed
}
