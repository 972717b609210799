use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Point, Size};

/// Normalized point inside an element's bounding box.
///
/// `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right. The
/// anchor is the point of the element that lands on its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal fraction of the element width.
    pub x: f64,
    /// Vertical fraction of the element height.
    pub y: f64,
}

impl Anchor {
    /// `top-left`
    pub const TOP_LEFT: Anchor = Anchor { x: 0.0, y: 0.0 };
    /// `top-center`
    pub const TOP_CENTER: Anchor = Anchor { x: 0.5, y: 0.0 };
    /// `top-right`
    pub const TOP_RIGHT: Anchor = Anchor { x: 1.0, y: 0.0 };
    /// `center-left`
    pub const CENTER_LEFT: Anchor = Anchor { x: 0.0, y: 0.5 };
    /// `center-center`, the global default.
    pub const CENTER_CENTER: Anchor = Anchor { x: 0.5, y: 0.5 };
    /// `center-right`
    pub const CENTER_RIGHT: Anchor = Anchor { x: 1.0, y: 0.5 };
    /// `bottom-left`
    pub const BOTTOM_LEFT: Anchor = Anchor { x: 0.0, y: 1.0 };
    /// `bottom-center`
    pub const BOTTOM_CENTER: Anchor = Anchor { x: 0.5, y: 1.0 };
    /// `bottom-right`
    pub const BOTTOM_RIGHT: Anchor = Anchor { x: 1.0, y: 1.0 };

    /// Every named anchor, row by row.
    pub const NAMED: [(&'static str, Anchor); 9] = [
        ("top-left", Self::TOP_LEFT),
        ("top-center", Self::TOP_CENTER),
        ("top-right", Self::TOP_RIGHT),
        ("center-left", Self::CENTER_LEFT),
        ("center-center", Self::CENTER_CENTER),
        ("center-right", Self::CENTER_RIGHT),
        ("bottom-left", Self::BOTTOM_LEFT),
        ("bottom-center", Self::BOTTOM_CENTER),
        ("bottom-right", Self::BOTTOM_RIGHT),
    ];

    /// Looks up a named anchor, ignoring case.
    pub fn named(name: &str) -> Option<Anchor> {
        let name = name.trim();
        Self::NAMED
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, anchor)| *anchor)
    }

    /// Parses a named anchor, falling back to `center-center` for unknown
    /// or missing names.
    pub fn parse(name: Option<&str>) -> Anchor {
        name.and_then(Self::named).unwrap_or(Self::CENTER_CENTER)
    }

    /// Top-left position that puts this anchor on `target`.
    pub fn apply(&self, target: Point, size: Size) -> Point {
        Point::new(
            target.x - size.width * self.x,
            target.y - size.height * self.y,
        )
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::CENTER_CENTER
    }
}

/// Anchor as written in a widget entry or plugin metadata.
///
/// Either a name such as `"top-left"` or explicit fractions `{x, y}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorSpec {
    /// One of the nine named anchors.
    Named(String),
    /// Explicit fractions, used as-is.
    Point {
        /// Horizontal fraction.
        x: f64,
        /// Vertical fraction.
        y: f64,
    },
}

impl AnchorSpec {
    /// Normalized anchor; unknown names resolve to `center-center`.
    pub fn resolve(&self) -> Anchor {
        match self {
            AnchorSpec::Named(name) => Anchor::parse(Some(name)),
            AnchorSpec::Point { x, y } => Anchor { x: *x, y: *y },
        }
    }

    /// An empty name counts as no anchor at all.
    pub fn is_blank(&self) -> bool {
        matches!(self, AnchorSpec::Named(name) if name.trim().is_empty())
    }
}

impl From<&str> for AnchorSpec {
    fn from(name: &str) -> Self {
        AnchorSpec::Named(name.to_string())
    }
}

impl fmt::Display for AnchorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorSpec::Named(name) => write!(f, "{name}"),
            AnchorSpec::Point { x, y } => write!(f, "({x}, {y})"),
        }
    }
}

/// Top-left position for an element of `width`×`height` whose `anchor`
/// must sit on `(target_x, target_y)`.
pub fn apply_anchor(target_x: f64, target_y: f64, width: f64, height: f64, anchor: &Anchor) -> Point {
    anchor.apply(Point::new(target_x, target_y), Size::new(width, height))
}
