//! Single-element leaf nodes.
//!
//! [`Placement`] starts from the element's current rectangle and runs its
//! scheme against the source. [`FittingPlacement`] starts from the element's
//! current origin and its natural size for the source's size instead.

use std::rc::Rc;

use log::trace;

use trellis_core::{geometry::Rect, identifier::NodeId};

use crate::{
    binding::{Cached, FittingSizeMutator, RectMutator},
    cache::SizeCache,
    error::Result,
    node::{Layout, LayoutExt},
    scheme::Scheme,
};

/// Places one element by running a scheme over its current rectangle.
///
/// The default scheme is [`Scheme::equal`], which fills the source.
///
/// # Examples
///
/// ```
/// # use trellis::{Layout, Placement, binding::Accessor};
/// # use trellis::{geometry::Rect, scheme::{Dimension, Scheme}};
/// struct Card {
///     badge: Rect,
/// }
///
/// let badge = Placement::new(Accessor::new(
///     |card: &Card| card.badge,
///     |card: &mut Card, rect| card.badge = rect,
/// ))
/// .with_scheme(
///     Scheme::new()
///         .width(Dimension::Constant(20.0))
///         .height(Dimension::Constant(20.0))
///         .right(-8.0)
///         .top(8.0),
/// );
///
/// let mut card = Card { badge: Rect::default() };
/// badge.layout(&mut card, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
/// assert_eq!(card.badge, Rect::new(172.0, 8.0, 20.0, 20.0));
/// ```
pub struct Placement<B> {
    id: Option<NodeId>,
    binding: B,
    scheme: Scheme,
}

impl<B> Placement<B> {
    pub fn new(binding: B) -> Self {
        Self {
            id: None,
            binding,
            scheme: Scheme::equal(),
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }
}

impl<V, B: RectMutator<V>> Layout<V> for Placement<B> {
    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        let mut rect = self.binding.rect(view);
        self.scheme.apply(&mut rect, source);
        Ok(rect)
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        self.binding.set_rect(view, rect);
        Ok(())
    }
}

impl<B> LayoutExt for Placement<B> {}

/// Places one element at its natural size.
///
/// Always reports itself fixed on both axes: its footprint comes from its
/// content, not from the container.
pub struct FittingPlacement<B> {
    id: Option<NodeId>,
    binding: B,
    scheme: Scheme,
}

impl<B> FittingPlacement<B> {
    /// Creates a fitting placement with an empty scheme.
    pub fn new(binding: B) -> Self {
        Self {
            id: None,
            binding,
            scheme: Scheme::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }
}

impl<B, C: SizeCache> FittingPlacement<Cached<B, C>> {
    /// Creates a fitting placement whose natural size is memoized in `cache`.
    ///
    /// The cache is keyed by `id`, which therefore becomes the node's id.
    pub fn cached(binding: B, cache: Rc<C>, id: impl Into<NodeId>) -> Self {
        let id = id.into();
        FittingPlacement::new(Cached::new(id, binding, cache)).with_id(id)
    }
}

impl<V, B: FittingSizeMutator<V>> Layout<V> for FittingPlacement<B> {
    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn is_fixed_width(&self) -> bool {
        true
    }

    fn is_fixed_height(&self) -> bool {
        true
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        let origin = self.binding.rect(view).origin();
        let size = self.binding.fitting_size(view, source.size());
        let mut rect = Rect::from_origin_size(origin, size);
        self.scheme.apply(&mut rect, source);
        trace!(id:? = self.id, size:?, rect:?; "Measured fitting placement");
        Ok(rect)
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        self.binding.set_rect(view, rect);
        Ok(())
    }
}

impl<B> LayoutExt for FittingPlacement<B> {}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        anchor::{Anchor, Edge},
        binding::{Accessor, Fitting},
        cache::FittingSizeCache,
        geometry::Size,
        scheme::Dimension,
        snapshot::Snapshot,
    };

    struct Row {
        icon: Rect,
        text: Rect,
        text_natural: Size,
        text_queries: Cell<usize>,
    }

    impl Row {
        fn new() -> Self {
            Self {
                icon: Rect::new(3.0, 4.0, 0.0, 0.0),
                text: Rect::new(7.0, 9.0, 0.0, 0.0),
                text_natural: Size::new(80.0, 16.0),
                text_queries: Cell::new(0),
            }
        }
    }

    fn icon() -> Accessor<impl Fn(&Row) -> Rect, impl Fn(&mut Row, Rect)> {
        Accessor::new(|row: &Row| row.icon, |row: &mut Row, rect| row.icon = rect)
    }

    fn text()
    -> Fitting<impl Fn(&Row) -> Rect, impl Fn(&mut Row, Rect), impl Fn(&Row, Size) -> Size> {
        Fitting::new(
            |row: &Row| row.text,
            |row: &mut Row, rect| row.text = rect,
            |row: &Row, available: Size| {
                row.text_queries.set(row.text_queries.get() + 1);
                Size::new(
                    row.text_natural.width().min(available.width()),
                    row.text_natural.height(),
                )
            },
        )
    }

    #[test]
    fn test_placement_defaults_to_fill() {
        let mut row = Row::new();
        let source = Rect::new(0.0, 0.0, 300.0, 44.0);

        Placement::new(icon()).layout(&mut row, source).unwrap();
        assert_eq!(row.icon, source);
    }

    #[test]
    fn test_placement_starts_from_current_rect() {
        let row = Row::new();
        let node =
            Placement::new(icon()).with_scheme(Scheme::new().width(Dimension::Current(-10.0)));

        let rect = node.measure(&row, Rect::new(0.0, 0.0, 300.0, 44.0)).unwrap();
        assert_eq!(rect, Rect::new(3.0, 4.0, 10.0, 0.0));
    }

    #[test]
    fn test_measure_does_not_commit() {
        let row = Row::new();
        let node = Placement::new(icon());

        node.measure(&row, Rect::new(0.0, 0.0, 300.0, 44.0)).unwrap();
        assert_eq!(row.icon, Rect::new(3.0, 4.0, 0.0, 0.0));
    }

    #[test]
    fn test_fitting_placement_uses_origin_and_natural_size() {
        let mut row = Row::new();
        let node = FittingPlacement::new(text());
        assert!(Layout::<Row>::is_fixed_width(&node));
        assert!(Layout::<Row>::is_fixed_height(&node));

        node.layout(&mut row, Rect::new(0.0, 0.0, 50.0, 44.0)).unwrap();
        assert_eq!(row.text, Rect::new(7.0, 9.0, 50.0, 16.0));
    }

    #[test]
    fn test_fitting_placement_runs_scheme_after_fitting() {
        let mut row = Row::new();
        let node = FittingPlacement::new(text()).with_scheme(
            Scheme::new()
                .align(Edge::MinX, Anchor::Max)
                .left(52.0)
                .center_y(),
        );

        node.layout(&mut row, Rect::new(0.0, 0.0, 300.0, 44.0)).unwrap();
        assert_eq!(row.text, Rect::new(52.0, 14.0, 80.0, 16.0));
    }

    #[test]
    fn test_cached_fitting_placement() {
        let cache = Rc::new(FittingSizeCache::new());
        let node = FittingPlacement::cached(text(), Rc::clone(&cache), 4usize);
        let mut row = Row::new();
        let source = Rect::new(0.0, 0.0, 300.0, 44.0);

        assert_eq!(Layout::<Row>::id(&node), Some(NodeId::new(4)));

        node.layout(&mut row, source).unwrap();
        row.text_natural = Size::new(120.0, 20.0);
        node.layout(&mut row, source).unwrap();
        assert_eq!(row.text.size(), Size::new(80.0, 16.0));
        assert_eq!(row.text_queries.get(), 1);

        cache.invalidate_all();
        node.layout(&mut row, source).unwrap();
        assert_eq!(row.text.size(), Size::new(120.0, 20.0));
        assert_eq!(row.text_queries.get(), 2);
    }

    #[test]
    fn test_snapshot_then_apply_matches_commit() {
        let source = Rect::new(0.0, 0.0, 300.0, 44.0);
        let node = Placement::new(icon())
            .with_id(1usize)
            .with_scheme(
                Scheme::new()
                    .width(Dimension::Constant(24.0))
                    .height(Dimension::Constant(24.0))
                    .center(),
            );

        let mut committed = Row::new();
        node.layout(&mut committed, source).unwrap();

        let mut replayed = Row::new();
        let mut snapshot = Snapshot::new();
        node.collect(&mut snapshot, &replayed, source).unwrap();
        assert_eq!(replayed.icon, Rect::new(3.0, 4.0, 0.0, 0.0));
        node.apply(&snapshot, &mut replayed).unwrap();

        assert_eq!(committed.icon, replayed.icon);
        assert_eq!(replayed.icon, Rect::new(138.0, 10.0, 24.0, 24.0));
    }
}
