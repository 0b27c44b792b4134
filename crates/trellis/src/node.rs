//! The layout node protocol.
//!
//! Every node of a layout tree implements [`Layout`] for the host view type
//! `V`. A node supports three kinds of passes that share one semantic:
//!
//! - **Commit** ([`Layout::layout`]): compute and write geometry immediately.
//! - **Measure** ([`Layout::measure`]): compute a rectangle, write nothing.
//! - **Snapshot** ([`Layout::collect`] then [`Layout::apply`]): record every
//!   computed rectangle under its node's id, then replay the records onto
//!   the view.
//!
//! Trees are built once and evaluated many times; nodes never change during
//! a pass.

use trellis_core::{geometry::Rect, identifier::NodeId};

use crate::{
    constraints::{Constrained, Reference},
    error::{LayoutError, Result},
    scheme::Scheme,
    snapshot::Snapshot,
};

/// One step of a layout tree over host view `V`.
pub trait Layout<V> {
    /// Identifier used for snapshot records, references and caching.
    fn id(&self) -> Option<NodeId> {
        None
    }

    /// Whether a stack should keep this node's measured width.
    fn is_fixed_width(&self) -> bool {
        false
    }

    /// Whether a stack should keep this node's measured height.
    fn is_fixed_height(&self) -> bool {
        false
    }

    /// Computes the rectangle this node would occupy for `source`.
    fn measure(&self, view: &V, source: Rect) -> Result<Rect>;

    /// Like [`Layout::measure`], but references to other nodes resolve
    /// against `snapshot` instead of the view.
    ///
    /// Sequences call this while collecting, before placing an item.
    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        let _ = snapshot;
        self.measure(view, source)
    }

    /// Writes an already computed rectangle.
    ///
    /// Composite nodes lay their children out within `rect`.
    fn commit(&self, view: &mut V, rect: Rect) -> Result<()>;

    /// Computes and commits in one pass.
    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        let rect = self.measure(view, source)?;
        self.commit(view, rect)
    }

    /// Snapshot analog of [`Layout::commit`]: records `rect` instead of writing it.
    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        let _ = view;
        if let Some(id) = self.id() {
            snapshot.insert(id, rect);
        }
        Ok(())
    }

    /// First snapshot phase: compute and record without touching the view.
    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        let rect = self.measure(view, source)?;
        self.record(snapshot, view, rect)
    }

    /// Second snapshot phase: commit the rectangle recorded under this node's id.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MissingIdentifier`] when the node has no id, and
    /// [`LayoutError::UnresolvedReference`] when nothing was recorded for it.
    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        let id = self
            .id()
            .ok_or_else(|| LayoutError::missing_identifier::<Self>("apply"))?;
        let rect = snapshot.resolve(id)?;
        self.commit(view, rect)
    }
}

impl<V, L: Layout<V> + ?Sized> Layout<V> for Box<L> {
    fn id(&self) -> Option<NodeId> {
        (**self).id()
    }

    fn is_fixed_width(&self) -> bool {
        (**self).is_fixed_width()
    }

    fn is_fixed_height(&self) -> bool {
        (**self).is_fixed_height()
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        (**self).measure(view, source)
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        (**self).measure_recorded(snapshot, view, source)
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        (**self).commit(view, rect)
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        (**self).layout(view, source)
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        (**self).record(snapshot, view, rect)
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        (**self).collect(snapshot, view, source)
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        (**self).apply(snapshot, view)
    }
}

/// Builder combinators shared by every node type.
pub trait LayoutExt: Sized {
    /// Runs `scheme` over this node's source against `reference` before delegating.
    fn constrained<V>(self, reference: Reference<V>, scheme: Scheme) -> Constrained<V, Self> {
        Constrained::new(self, reference, scheme)
    }

    /// Overrides the fixed flags; `None` keeps the wrapped node's answer.
    fn fixed(self, width: Option<bool>, height: Option<bool>) -> Resizing<Self> {
        Resizing::new(self, width, height)
    }

    /// Like [`LayoutExt::fixed`] with the flags inverted.
    fn flexible(self, width: Option<bool>, height: Option<bool>) -> Resizing<Self> {
        Resizing::new(self, width.map(|w| !w), height.map(|h| !h))
    }

    fn fixed_size(self) -> Resizing<Self> {
        Resizing::new(self, Some(true), Some(true))
    }

    fn flexible_size(self) -> Resizing<Self> {
        Resizing::new(self, Some(false), Some(false))
    }

    fn boxed<V>(self) -> Box<dyn Layout<V>>
    where
        Self: Layout<V> + 'static,
    {
        Box::new(self)
    }
}

/// A node that occupies nothing and writes nothing.
///
/// It measures to [`Rect::NULL`], so it never grows a union.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl<V> Layout<V> for Empty {
    fn measure(&self, _view: &V, _source: Rect) -> Result<Rect> {
        Ok(Rect::NULL)
    }

    fn commit(&self, _view: &mut V, _rect: Rect) -> Result<()> {
        Ok(())
    }

    fn layout(&self, _view: &mut V, _source: Rect) -> Result<()> {
        Ok(())
    }

    fn record(&self, _snapshot: &mut Snapshot, _view: &V, _rect: Rect) -> Result<()> {
        Ok(())
    }

    fn collect(&self, _snapshot: &mut Snapshot, _view: &V, _source: Rect) -> Result<()> {
        Ok(())
    }

    fn apply(&self, _snapshot: &Snapshot, _view: &mut V) -> Result<()> {
        Ok(())
    }
}

impl LayoutExt for Empty {}

/// An optional subtree: `None` behaves like [`Empty`].
impl<V, L: Layout<V>> Layout<V> for Option<L> {
    fn id(&self) -> Option<NodeId> {
        self.as_ref().and_then(|node| node.id())
    }

    fn is_fixed_width(&self) -> bool {
        self.as_ref().is_some_and(|node| node.is_fixed_width())
    }

    fn is_fixed_height(&self) -> bool {
        self.as_ref().is_some_and(|node| node.is_fixed_height())
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        match self {
            Some(node) => node.measure(view, source),
            None => Ok(Rect::NULL),
        }
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        match self {
            Some(node) => node.measure_recorded(snapshot, view, source),
            None => Ok(Rect::NULL),
        }
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        match self {
            Some(node) => node.commit(view, rect),
            None => Ok(()),
        }
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        match self {
            Some(node) => node.layout(view, source),
            None => Ok(()),
        }
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        match self {
            Some(node) => node.record(snapshot, view, rect),
            None => Ok(()),
        }
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        match self {
            Some(node) => node.collect(snapshot, view, source),
            None => Ok(()),
        }
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        match self {
            Some(node) => node.apply(snapshot, view),
            None => Ok(()),
        }
    }
}

/// Exactly one of two alternative subtrees, chosen when the tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<A, B> {
    First(A),
    Second(B),
}

impl<A, B> Either<A, B> {
    /// Builds `first()` when `condition` holds, `second()` otherwise.
    pub fn choose(condition: bool, first: impl FnOnce() -> A, second: impl FnOnce() -> B) -> Self {
        if condition {
            Either::First(first())
        } else {
            Either::Second(second())
        }
    }
}

macro_rules! either_dispatch {
    ($self:ident, $node:ident => $call:expr) => {
        match $self {
            Either::First($node) => $call,
            Either::Second($node) => $call,
        }
    };
}

impl<V, A: Layout<V>, B: Layout<V>> Layout<V> for Either<A, B> {
    fn id(&self) -> Option<NodeId> {
        either_dispatch!(self, node => node.id())
    }

    fn is_fixed_width(&self) -> bool {
        either_dispatch!(self, node => node.is_fixed_width())
    }

    fn is_fixed_height(&self) -> bool {
        either_dispatch!(self, node => node.is_fixed_height())
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        either_dispatch!(self, node => node.measure(view, source))
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        either_dispatch!(self, node => node.measure_recorded(snapshot, view, source))
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        either_dispatch!(self, node => node.commit(view, rect))
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        either_dispatch!(self, node => node.layout(view, source))
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        either_dispatch!(self, node => node.record(snapshot, view, rect))
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        either_dispatch!(self, node => node.collect(snapshot, view, source))
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        either_dispatch!(self, node => node.apply(snapshot, view))
    }
}

impl<A, B> LayoutExt for Either<A, B> {}

/// Overrides whether a node reports itself fixed on either axis.
///
/// Geometry is untouched; only ancestor stacks read the flags.
#[derive(Debug, Clone)]
pub struct Resizing<L> {
    inner: L,
    fixed_width: Option<bool>,
    fixed_height: Option<bool>,
}

impl<L> Resizing<L> {
    pub fn new(inner: L, fixed_width: Option<bool>, fixed_height: Option<bool>) -> Self {
        Self {
            inner,
            fixed_width,
            fixed_height,
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<V, L: Layout<V>> Layout<V> for Resizing<L> {
    fn id(&self) -> Option<NodeId> {
        self.inner.id()
    }

    fn is_fixed_width(&self) -> bool {
        self.fixed_width.unwrap_or_else(|| self.inner.is_fixed_width())
    }

    fn is_fixed_height(&self) -> bool {
        self.fixed_height
            .unwrap_or_else(|| self.inner.is_fixed_height())
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        self.inner.measure(view, source)
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        self.inner.measure_recorded(snapshot, view, source)
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        self.inner.commit(view, rect)
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        self.inner.layout(view, source)
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        self.inner.record(snapshot, view, rect)
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        self.inner.collect(snapshot, view, source)
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        self.inner.apply(snapshot, view)
    }
}

impl<L> LayoutExt for Resizing<L> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{binding::Accessor, placement::Placement, scheme::Dimension};

    #[derive(Default)]
    struct Panel {
        frame: Rect,
    }

    fn panel_node(id: Option<usize>) -> impl Layout<Panel> + LayoutExt {
        let node = Placement::new(Accessor::new(
            |panel: &Panel| panel.frame,
            |panel: &mut Panel, rect| panel.frame = rect,
        ))
        .with_scheme(
            Scheme::new()
                .width(Dimension::Constant(10.0))
                .height(Dimension::Constant(10.0)),
        );
        match id {
            Some(id) => node.with_id(NodeId::new(id)),
            None => node,
        }
    }

    #[test]
    fn test_empty_measures_null_and_writes_nothing() {
        let mut panel = Panel::default();
        let mut snapshot = Snapshot::new();
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert!(Empty.measure(&panel, source).unwrap().is_null());
        Layout::<Panel>::collect(&Empty, &mut snapshot, &panel, source).unwrap();
        Empty.layout(&mut panel, source).unwrap();
        Empty.apply(&snapshot, &mut panel).unwrap();

        assert!(snapshot.is_empty());
        assert_eq!(panel.frame, Rect::default());
    }

    #[test]
    fn test_option_none_is_empty() {
        let node: Option<Empty> = None;
        let panel = Panel::default();
        assert!(node.measure(&panel, Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap().is_null());
        assert_eq!(Layout::<Panel>::id(&node), None);
    }

    #[test]
    fn test_either_dispatches_to_chosen_branch() {
        let mut panel = Panel::default();
        let node = Either::choose(false, || Empty, || panel_node(Some(3)));

        assert_eq!(Layout::<Panel>::id(&node), Some(NodeId::new(3)));
        node.layout(&mut panel, Rect::new(5.0, 5.0, 100.0, 100.0)).unwrap();
        assert_eq!(panel.frame, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_resizing_overrides_flags_only() {
        let node = panel_node(None).fixed(Some(true), None);
        assert!(Layout::<Panel>::is_fixed_width(&node));
        assert!(!Layout::<Panel>::is_fixed_height(&node));

        let node = panel_node(None).fixed_size().flexible(None, Some(true));
        assert!(Layout::<Panel>::is_fixed_width(&node));
        assert!(!Layout::<Panel>::is_fixed_height(&node));

        let panel = Panel::default();
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            node.measure(&panel, source).unwrap(),
            panel_node(None).measure(&panel, source).unwrap()
        );
    }

    #[test]
    fn test_apply_without_id_is_error() {
        let mut panel = Panel::default();
        let node = panel_node(None);

        let err = node.apply(&Snapshot::new(), &mut panel).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MissingIdentifier {
                operation: "apply",
                ..
            }
        ));
    }

    #[test]
    fn test_apply_without_record_is_error() {
        let mut panel = Panel::default();
        let node = panel_node(Some(8));

        assert_eq!(
            node.apply(&Snapshot::new(), &mut panel),
            Err(LayoutError::UnresolvedReference(NodeId::new(8)))
        );
    }

    #[test]
    fn test_boxed_forwards() {
        let node: Box<dyn Layout<Panel>> = panel_node(Some(1)).boxed();
        assert_eq!(node.id(), Some(NodeId::new(1)));

        let mut snapshot = Snapshot::new();
        node.collect(&mut snapshot, &Panel::default(), Rect::new(0.0, 0.0, 50.0, 50.0))
            .unwrap();
        assert_eq!(snapshot.get(NodeId::new(1)), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
