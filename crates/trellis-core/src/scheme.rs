//! Rectangle algebra.
//!
//! A [`Transform`] maps a rectangle being computed plus a fixed reference
//! ("source") rectangle to a new rectangle. A [`Scheme`] is an ordered list of
//! transforms; applying it threads the rectangle through every transform in
//! order, each one seeing the same source.
//!
//! ```
//! # use trellis_core::{geometry::Rect, scheme::{Dimension, Scheme}};
//! let scheme = Scheme::new()
//!     .width(Dimension::Scaled(1.0))
//!     .height(Dimension::Scaled(0.5))
//!     .center_y()
//!     .right(0.0);
//!
//! let mut rect = Rect::default();
//! scheme.apply(&mut rect, Rect::new(0.0, 0.0, 320.0, 100.0));
//! assert_eq!(rect, Rect::new(0.0, 25.0, 320.0, 50.0));
//! ```
//!
//! # Directional relations
//!
//! [`BoundKind`] fixes one convention for the one-directional operators:
//! "before" keeps an anchor at or before (toward −axis) its target, "after"
//! keeps it at or after. A *limit* translates the whole rectangle; a *pull*
//! moves only the constrained edge and leaves the opposite edge in place.

use log::trace;

use crate::{
    anchor::{Anchor, Axis, Edge},
    geometry::{Insets, Point, Rect},
};

/// How a size rule derives an extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// A fixed extent.
    Constant(f32),
    /// A fraction of the source extent on the same axis.
    Scaled(f32),
    /// The source extent minus a delta.
    Inset(f32),
    /// The rectangle's own current extent minus a delta.
    Current(f32),
}

/// Sets the width or height of the rectangle, optionally clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRule {
    axis: Axis,
    dimension: Dimension,
    range: Option<(f32, f32)>,
}

impl SizeRule {
    pub fn new(axis: Axis, dimension: Dimension) -> Self {
        Self {
            axis,
            dimension,
            range: None,
        }
    }

    pub fn width(dimension: Dimension) -> Self {
        Self::new(Axis::Horizontal, dimension)
    }

    pub fn height(dimension: Dimension) -> Self {
        Self::new(Axis::Vertical, dimension)
    }

    /// Clamps the resulting extent to `min..=max`.
    pub fn between(mut self, min: f32, max: f32) -> Self {
        self.range = Some((min, max));
        self
    }

    fn apply(&self, rect: &mut Rect, source: Rect) {
        let axis = self.axis;
        let mut extent = match self.dimension {
            Dimension::Constant(value) => value,
            Dimension::Scaled(_) | Dimension::Inset(_) if source.is_null() => 0.0,
            Dimension::Scaled(factor) => source.extent(axis) * factor,
            Dimension::Inset(delta) => source.extent(axis) - delta,
            Dimension::Current(delta) => rect.extent(axis) - delta,
        };
        if let Some((min, max)) = self.range {
            extent = extent.max(min).min(max);
        }
        *rect = rect.with_extent(axis, extent);
    }
}

/// Moves the rectangle so one of its anchors matches an anchor of the source.
///
/// The target coordinate is `source.edge(target) + offset + multiplier ×
/// source extent` along the edge's axis. The rectangle keeps its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    edge: Edge,
    target: Anchor,
    offset: f32,
    multiplier: f32,
}

impl Alignment {
    /// Aligns `edge` of the rectangle to the `target` anchor of the source on the same axis.
    pub fn new(edge: Edge, target: Anchor) -> Self {
        Self {
            edge,
            target,
            offset: 0.0,
            multiplier: 0.0,
        }
    }

    /// Aligns `edge` to the same anchor of the source.
    pub fn same(edge: Edge) -> Self {
        Self::new(edge, edge.anchor())
    }

    /// Adds a constant offset to the target coordinate.
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Adds `multiplier × source extent` to the target coordinate.
    pub fn multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = multiplier;
        self
    }

    fn apply(&self, rect: &mut Rect, source: Rect) {
        let axis = self.edge.axis();
        let target = source.edge(self.edge.with_anchor(self.target))
            + self.offset
            + self.multiplier * source.extent(axis);
        *rect = rect.with_edge(self.edge, target);
    }
}

/// The four one-directional relations between an anchor and its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// If the anchor lies after the target, translate back onto it.
    LimitBefore,
    /// If the anchor lies before the target, translate forward onto it.
    LimitAfter,
    /// If the anchor lies after the target, move that edge back onto it.
    PullBefore,
    /// If the anchor lies before the target, move that edge forward onto it.
    PullAfter,
}

/// A one-directional constraint of an anchor against a source anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    edge: Edge,
    target: Anchor,
    kind: BoundKind,
    offset: f32,
}

impl Bound {
    pub fn new(edge: Edge, kind: BoundKind, target: Anchor) -> Self {
        Self {
            edge,
            target,
            kind,
            offset: 0.0,
        }
    }

    pub fn limit_before(edge: Edge, target: Anchor) -> Self {
        Self::new(edge, BoundKind::LimitBefore, target)
    }

    pub fn limit_after(edge: Edge, target: Anchor) -> Self {
        Self::new(edge, BoundKind::LimitAfter, target)
    }

    pub fn pull_before(edge: Edge, target: Anchor) -> Self {
        Self::new(edge, BoundKind::PullBefore, target)
    }

    pub fn pull_after(edge: Edge, target: Anchor) -> Self {
        Self::new(edge, BoundKind::PullAfter, target)
    }

    /// Shifts the target coordinate by `offset`.
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    fn apply(&self, rect: &mut Rect, source: Rect) {
        let target = source.edge(self.edge.with_anchor(self.target)) + self.offset;
        let current = rect.edge(self.edge);
        *rect = match self.kind {
            BoundKind::LimitBefore if current > target => rect.with_edge(self.edge, target),
            BoundKind::LimitAfter if current < target => rect.with_edge(self.edge, target),
            BoundKind::PullBefore if current > target => rect.stretch_edge(self.edge, target),
            BoundKind::PullAfter if current < target => rect.stretch_edge(self.edge, target),
            _ => *rect,
        };
    }
}

/// A single rectangle transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Replaces the rectangle with the source.
    Equal,
    Size(SizeRule),
    /// Sets the extent on `axis` to the other axis' extent times `ratio`.
    Ratio { axis: Axis, ratio: f32 },
    Align(Alignment),
    Bound(Bound),
    /// Replaces the rectangle with the source shrunk by the insets.
    Inset(Insets),
    /// Translates the rectangle.
    Offset(Point),
}

impl Transform {
    pub fn apply(&self, rect: &mut Rect, source: Rect) {
        match self {
            Transform::Equal => *rect = source,
            Transform::Size(rule) => rule.apply(rect, source),
            Transform::Ratio { axis, ratio } => {
                let other = rect.extent(axis.cross());
                *rect = rect.with_extent(*axis, other * ratio);
            }
            Transform::Align(alignment) => alignment.apply(rect, source),
            Transform::Bound(bound) => bound.apply(rect, source),
            Transform::Inset(insets) => *rect = source.inset(*insets),
            Transform::Offset(offset) => *rect = rect.translate(*offset),
        }
    }
}

impl From<SizeRule> for Transform {
    fn from(rule: SizeRule) -> Self {
        Transform::Size(rule)
    }
}

impl From<Alignment> for Transform {
    fn from(alignment: Alignment) -> Self {
        Transform::Align(alignment)
    }
}

impl From<Bound> for Transform {
    fn from(bound: Bound) -> Self {
        Transform::Bound(bound)
    }
}

/// An ordered rectangle-transform program.
///
/// An empty scheme leaves the rectangle untouched; [`Scheme::equal`] copies
/// the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scheme(Vec<Transform>);

impl Scheme {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A scheme that fills the source verbatim.
    pub fn equal() -> Self {
        Self(vec![Transform::Equal])
    }

    /// Appends a transform.
    pub fn then(mut self, transform: impl Into<Transform>) -> Self {
        self.0.push(transform.into());
        self
    }

    pub fn width(self, dimension: Dimension) -> Self {
        self.then(SizeRule::width(dimension))
    }

    pub fn height(self, dimension: Dimension) -> Self {
        self.then(SizeRule::height(dimension))
    }

    /// Aligns `edge` to the `target` anchor of the source.
    pub fn align(self, edge: Edge, target: Anchor) -> Self {
        self.then(Alignment::new(edge, target))
    }

    pub fn left(self, offset: f32) -> Self {
        self.then(Alignment::same(Edge::MinX).offset(offset))
    }

    pub fn right(self, offset: f32) -> Self {
        self.then(Alignment::same(Edge::MaxX).offset(offset))
    }

    pub fn top(self, offset: f32) -> Self {
        self.then(Alignment::same(Edge::MinY).offset(offset))
    }

    pub fn bottom(self, offset: f32) -> Self {
        self.then(Alignment::same(Edge::MaxY).offset(offset))
    }

    pub fn center_x(self) -> Self {
        self.then(Alignment::same(Edge::MidX))
    }

    pub fn center_y(self) -> Self {
        self.then(Alignment::same(Edge::MidY))
    }

    /// Centers the rectangle on both axes.
    pub fn center(self) -> Self {
        self.center_x().center_y()
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Runs every transform in order against the same source.
    pub fn apply(&self, rect: &mut Rect, source: Rect) {
        for transform in &self.0 {
            transform.apply(rect, source);
        }
        trace!(transforms = self.0.len(), rect:? = *rect, source:?; "Applied scheme");
    }
}

impl FromIterator<Transform> for Scheme {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    const SOURCE: Rect = Rect::NULL;

    fn source() -> Rect {
        Rect::new(0.0, 0.0, 320.0, 100.0)
    }

    #[test]
    fn test_equal_copies_source() {
        let mut rect = Rect::new(5.0, 5.0, 1.0, 1.0);
        Transform::Equal.apply(&mut rect, source());
        assert_eq!(rect, source());
    }

    #[test]
    fn test_empty_scheme_is_noop() {
        let mut rect = Rect::new(5.0, 5.0, 1.0, 1.0);
        Scheme::new().apply(&mut rect, source());
        assert_eq!(rect, Rect::new(5.0, 5.0, 1.0, 1.0));
    }

    #[test]
    fn test_size_rules() {
        let mut rect = Rect::new(10.0, 10.0, 40.0, 20.0);

        Transform::from(SizeRule::width(Dimension::Constant(70.0))).apply(&mut rect, source());
        assert_eq!(rect.width(), 70.0);

        Transform::from(SizeRule::width(Dimension::Scaled(0.25))).apply(&mut rect, source());
        assert_eq!(rect.width(), 80.0);

        Transform::from(SizeRule::height(Dimension::Inset(30.0))).apply(&mut rect, source());
        assert_eq!(rect.height(), 70.0);

        Transform::from(SizeRule::height(Dimension::Current(-10.0))).apply(&mut rect, source());
        assert_eq!(rect.height(), 80.0);

        // Origin is never touched by size rules
        assert_eq!(rect.origin(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_size_rule_between_clamps() {
        let mut rect = Rect::default();

        Transform::from(SizeRule::width(Dimension::Scaled(1.0)).between(300.0, 700.0))
            .apply(&mut rect, Rect::new(0.0, 0.0, 1000.0, 10.0));
        assert_eq!(rect.width(), 700.0);

        Transform::from(SizeRule::width(Dimension::Scaled(1.0)).between(300.0, 700.0))
            .apply(&mut rect, Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(rect.width(), 300.0);
    }

    #[test]
    fn test_size_rules_against_null_source() {
        let mut rect = Rect::new(0.0, 0.0, 40.0, 40.0);

        Transform::from(SizeRule::width(Dimension::Scaled(2.0))).apply(&mut rect, SOURCE);
        Transform::from(SizeRule::height(Dimension::Inset(10.0))).apply(&mut rect, SOURCE);
        assert_eq!(rect.size(), Size::new(0.0, 0.0));
    }

    #[test]
    fn test_position_against_null_source_resolves_arithmetically() {
        let mut rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        Transform::from(Alignment::same(Edge::MinX).offset(10.0)).apply(&mut rect, SOURCE);
        assert!(rect.x().is_infinite());
        assert_eq!(rect.width(), 40.0);
    }

    #[test]
    fn test_ratio() {
        let mut rect = Rect::new(0.0, 0.0, 40.0, 10.0);
        Transform::Ratio {
            axis: Axis::Vertical,
            ratio: 0.5,
        }
        .apply(&mut rect, source());
        assert_eq!(rect.height(), 20.0);
    }

    #[test]
    fn test_alignment_with_offset_and_multiplier() {
        let mut rect = Rect::new(0.0, 0.0, 40.0, 10.0);

        Transform::from(Alignment::same(Edge::MinY).offset(40.0)).apply(&mut rect, source());
        assert_eq!(rect.min_y(), 40.0);

        Transform::from(Alignment::same(Edge::MinX).multiplier(0.25)).apply(&mut rect, source());
        assert_eq!(rect.min_x(), 80.0);

        Transform::from(Alignment::new(Edge::MinY, Anchor::Max)).apply(&mut rect, source());
        assert_eq!(rect.min_y(), 100.0);
    }

    #[test]
    fn test_scheme_scenario_right_center() {
        let scheme = Scheme::new()
            .width(Dimension::Scaled(1.0))
            .height(Dimension::Scaled(0.5))
            .align(Edge::MidY, Anchor::Mid)
            .align(Edge::MaxX, Anchor::Max);

        let mut rect = Rect::default();
        scheme.apply(&mut rect, source());
        assert_eq!(rect, Rect::new(0.0, 25.0, 320.0, 50.0));
    }

    #[test]
    fn test_later_transform_overrides_earlier() {
        let scheme = Scheme::new()
            .width(Dimension::Constant(10.0))
            .width(Dimension::Constant(20.0))
            .left(5.0)
            .left(0.0);

        let mut rect = Rect::default();
        scheme.apply(&mut rect, source());
        assert_eq!(rect, Rect::new(0.0, 0.0, 20.0, 0.0));
    }

    #[test]
    fn test_inset_and_offset() {
        let mut rect = Rect::default();
        Scheme::new()
            .then(Transform::Inset(Insets::uniform(10.0)))
            .then(Transform::Offset(Point::new(5.0, 0.0)))
            .apply(&mut rect, source());
        assert_eq!(rect, Rect::new(15.0, 10.0, 300.0, 80.0));
    }

    #[test]
    fn test_limit_before_only_moves_back() {
        let reference = Rect::new(0.0, 0.0, 100.0, 100.0);

        // Crosses the target: translated back, size kept
        let mut rect = Rect::new(80.0, 0.0, 40.0, 10.0);
        Transform::from(Bound::limit_before(Edge::MaxX, Anchor::Max)).apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(60.0, 0.0, 40.0, 10.0));

        // Already before the target: untouched
        let mut rect = Rect::new(10.0, 0.0, 40.0, 10.0);
        Transform::from(Bound::limit_before(Edge::MaxX, Anchor::Max)).apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(10.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn test_limit_after_only_moves_forward() {
        let reference = Rect::new(0.0, 50.0, 100.0, 100.0);

        let mut rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        Transform::from(Bound::limit_after(Edge::MinY, Anchor::Mid)).apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(0.0, 100.0, 10.0, 10.0));

        let mut rect = Rect::new(0.0, 120.0, 10.0, 10.0);
        Transform::from(Bound::limit_after(Edge::MinY, Anchor::Mid)).apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(0.0, 120.0, 10.0, 10.0));
    }

    #[test]
    fn test_pull_after_stretches_edge() {
        let reference = Rect::new(0.0, 0.0, 100.0, 300.0);

        let mut rect = Rect::new(0.0, 20.0, 100.0, 100.0);
        Transform::from(Bound::pull_after(Edge::MaxY, Anchor::Max)).apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(0.0, 20.0, 100.0, 280.0));

        // Already beyond: a pull never pushes back
        let mut rect = Rect::new(0.0, 20.0, 100.0, 400.0);
        Transform::from(Bound::pull_after(Edge::MaxY, Anchor::Max)).apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(0.0, 20.0, 100.0, 400.0));
    }

    #[test]
    fn test_pull_before_stretches_edge() {
        let reference = Rect::new(50.0, 0.0, 100.0, 100.0);

        let mut rect = Rect::new(80.0, 0.0, 20.0, 10.0);
        Transform::from(Bound::pull_before(Edge::MinX, Anchor::Min)).apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(50.0, 0.0, 50.0, 10.0));

        let mut rect = Rect::new(10.0, 0.0, 20.0, 10.0);
        Transform::from(Bound::pull_before(Edge::MinX, Anchor::Min).offset(-5.0))
            .apply(&mut rect, reference);
        assert_eq!(rect, Rect::new(10.0, 0.0, 20.0, 10.0));
    }
}
