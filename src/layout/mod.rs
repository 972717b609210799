//! Widget placement.
//!
//! Turns a widget entry into a screen position in two steps. First a
//! target point is derived from the profile's position mode (grid cell
//! or absolute pixels). Then the element's anchor is aligned to that
//! point using the element's measured size. The second step can only run
//! once the element has been laid out, so callers re-run it whenever the
//! measured size changes.

mod anchor;
mod geometry;
mod position;

#[cfg(test)]
mod tests;

pub use anchor::{Anchor, AnchorSpec, apply_anchor};
pub use geometry::{Point, Size};
pub use position::{DEFAULT_COORDINATE, compute_position, compute_target, resolve_anchor};
