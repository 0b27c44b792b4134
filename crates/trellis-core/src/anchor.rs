//! Named reference points on a rectangle.
//!
//! An [`Edge`] pairs an [`Axis`] with an [`Anchor`] (min, mid or max along that
//! axis). Edges are what the rect algebra aligns, limits and pulls.

use std::fmt;

use serde::Deserialize;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A position along an axis relative to a rectangle's extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Left or top edge.
    Min,
    /// Horizontal or vertical midline.
    Mid,
    /// Right or bottom edge.
    Max,
}

/// A named edge or midline of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    MinX,
    MidX,
    MaxX,
    MinY,
    MidY,
    MaxY,
}

impl Edge {
    pub const ALL: [Edge; 6] = [
        Edge::MinX,
        Edge::MidX,
        Edge::MaxX,
        Edge::MinY,
        Edge::MidY,
        Edge::MaxY,
    ];

    /// Alias for [`Edge::MinX`].
    pub const LEFT: Edge = Edge::MinX;
    /// Alias for [`Edge::MaxX`].
    pub const RIGHT: Edge = Edge::MaxX;
    /// Alias for [`Edge::MinY`].
    pub const TOP: Edge = Edge::MinY;
    /// Alias for [`Edge::MaxY`].
    pub const BOTTOM: Edge = Edge::MaxY;

    /// Builds the edge at `anchor` along `axis`
    pub fn new(axis: Axis, anchor: Anchor) -> Self {
        match (axis, anchor) {
            (Axis::Horizontal, Anchor::Min) => Edge::MinX,
            (Axis::Horizontal, Anchor::Mid) => Edge::MidX,
            (Axis::Horizontal, Anchor::Max) => Edge::MaxX,
            (Axis::Vertical, Anchor::Min) => Edge::MinY,
            (Axis::Vertical, Anchor::Mid) => Edge::MidY,
            (Axis::Vertical, Anchor::Max) => Edge::MaxY,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Edge::MinX | Edge::MidX | Edge::MaxX => Axis::Horizontal,
            Edge::MinY | Edge::MidY | Edge::MaxY => Axis::Vertical,
        }
    }

    pub fn anchor(self) -> Anchor {
        match self {
            Edge::MinX | Edge::MinY => Anchor::Min,
            Edge::MidX | Edge::MidY => Anchor::Mid,
            Edge::MaxX | Edge::MaxY => Anchor::Max,
        }
    }

    /// Returns the edge on the same axis at a different anchor
    pub fn with_anchor(self, anchor: Anchor) -> Self {
        Edge::new(self.axis(), anchor)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::MinX => "minX",
            Edge::MidX => "midX",
            Edge::MaxX => "maxX",
            Edge::MinY => "minY",
            Edge::MidY => "midY",
            Edge::MaxY => "maxY",
        };
        f.write_str(name)
    }
}
