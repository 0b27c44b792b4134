//! Element bindings.
//!
//! A binding is how a node reads and writes one element's geometry inside a
//! host-owned view `V`. Bindings never own the element; every call receives
//! the view explicitly.
//!
//! # Overview
//!
//! - [`RectAccessor`] / [`RectMutator`] / [`FittingSizeMutator`] - the three capabilities
//! - [`Accessor`] - getter and setter closures over one field
//! - [`Fitting`] - an [`Accessor`] plus a natural-size closure
//! - [`Slot`] - an entry of a host implementing [`ElementTable`]
//! - [`ConstantRect`] / [`External`] - read-only references for constraints
//! - [`Cached`] - fitting-size memoization keyed by [`NodeId`]

use std::rc::Rc;

use log::trace;

use trellis_core::{
    geometry::{Rect, Size},
    identifier::NodeId,
};

use crate::cache::SizeCache;

/// Reads an element's rectangle.
pub trait RectAccessor<V> {
    fn rect(&self, view: &V) -> Rect;
}

/// Reads and writes an element's rectangle.
pub trait RectMutator<V>: RectAccessor<V> {
    fn set_rect(&self, view: &mut V, rect: Rect);
}

/// A mutator whose element can report a natural size for an available size.
///
/// `fitting_size` must not mutate the view or start a nested layout pass.
pub trait FittingSizeMutator<V>: RectMutator<V> {
    fn fitting_size(&self, view: &V, available: Size) -> Size;
}

/// A host that keeps its elements' frames in a keyed table.
///
/// Implementing this trait makes [`Slot`] usable as a binding for every key.
pub trait ElementTable {
    type Key: Copy;

    fn frame(&self, key: Self::Key) -> Rect;

    fn set_frame(&mut self, key: Self::Key, rect: Rect);

    /// Natural size of the element for `available` space.
    ///
    /// Defaults to the element's current size.
    fn fitting_size(&self, key: Self::Key, available: Size) -> Size {
        let _ = available;
        self.frame(key).size()
    }
}

/// Direct binding built from a getter and a setter.
///
/// # Examples
///
/// ```
/// # use trellis::binding::{Accessor, RectAccessor, RectMutator};
/// # use trellis::geometry::Rect;
/// struct Card {
///     title: Rect,
/// }
///
/// let title = Accessor::new(|card: &Card| card.title, |card: &mut Card, rect| card.title = rect);
///
/// let mut card = Card { title: Rect::default() };
/// title.set_rect(&mut card, Rect::new(0.0, 0.0, 10.0, 10.0));
/// assert_eq!(title.rect(&card), Rect::new(0.0, 0.0, 10.0, 10.0));
/// ```
#[derive(Clone, Copy)]
pub struct Accessor<G, S> {
    get: G,
    set: S,
}

impl<G, S> Accessor<G, S> {
    pub fn new<V>(get: G, set: S) -> Self
    where
        G: Fn(&V) -> Rect,
        S: Fn(&mut V, Rect),
    {
        Self { get, set }
    }
}

impl<V, G, S> RectAccessor<V> for Accessor<G, S>
where
    G: Fn(&V) -> Rect,
{
    fn rect(&self, view: &V) -> Rect {
        (self.get)(view)
    }
}

impl<V, G, S> RectMutator<V> for Accessor<G, S>
where
    G: Fn(&V) -> Rect,
    S: Fn(&mut V, Rect),
{
    fn set_rect(&self, view: &mut V, rect: Rect) {
        (self.set)(view, rect)
    }
}

/// Direct binding whose element also reports a natural size.
#[derive(Clone, Copy)]
pub struct Fitting<G, S, F> {
    frame: Accessor<G, S>,
    fit: F,
}

impl<G, S, F> Fitting<G, S, F> {
    pub fn new<V>(get: G, set: S, fit: F) -> Self
    where
        G: Fn(&V) -> Rect,
        S: Fn(&mut V, Rect),
        F: Fn(&V, Size) -> Size,
    {
        Self {
            frame: Accessor::new(get, set),
            fit,
        }
    }
}

impl<V, G, S, F> RectAccessor<V> for Fitting<G, S, F>
where
    G: Fn(&V) -> Rect,
{
    fn rect(&self, view: &V) -> Rect {
        self.frame.rect(view)
    }
}

impl<V, G, S, F> RectMutator<V> for Fitting<G, S, F>
where
    G: Fn(&V) -> Rect,
    S: Fn(&mut V, Rect),
{
    fn set_rect(&self, view: &mut V, rect: Rect) {
        self.frame.set_rect(view, rect)
    }
}

impl<V, G, S, F> FittingSizeMutator<V> for Fitting<G, S, F>
where
    G: Fn(&V) -> Rect,
    S: Fn(&mut V, Rect),
    F: Fn(&V, Size) -> Size,
{
    fn fitting_size(&self, view: &V, available: Size) -> Size {
        (self.fit)(view, available)
    }
}

/// Binding to one entry of an [`ElementTable`] host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<K>(pub K);

impl<V: ElementTable> RectAccessor<V> for Slot<V::Key> {
    fn rect(&self, view: &V) -> Rect {
        view.frame(self.0)
    }
}

impl<V: ElementTable> RectMutator<V> for Slot<V::Key> {
    fn set_rect(&self, view: &mut V, rect: Rect) {
        view.set_frame(self.0, rect)
    }
}

impl<V: ElementTable> FittingSizeMutator<V> for Slot<V::Key> {
    fn fitting_size(&self, view: &V, available: Size) -> Size {
        view.fitting_size(self.0, available)
    }
}

/// A reference that always reads the same rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRect(pub Rect);

impl<V> RectAccessor<V> for ConstantRect {
    fn rect(&self, _view: &V) -> Rect {
        self.0
    }
}

/// A read-only reference computed by a closure.
#[derive(Clone, Copy)]
pub struct External<F>(F);

impl<F> External<F> {
    pub fn new<V>(read: F) -> Self
    where
        F: Fn(&V) -> Rect,
    {
        Self(read)
    }
}

impl<V, F> RectAccessor<V> for External<F>
where
    F: Fn(&V) -> Rect,
{
    fn rect(&self, view: &V) -> Rect {
        (self.0)(view)
    }
}

/// Fitting binding whose natural size is memoized in a [`SizeCache`].
///
/// A hit returns the cached size without consulting the element; a miss asks
/// the base binding and stores the answer under `id`.
pub struct Cached<B, C> {
    id: NodeId,
    base: B,
    cache: Rc<C>,
}

impl<B, C> Cached<B, C> {
    pub fn new(id: NodeId, base: B, cache: Rc<C>) -> Self {
        Self { id, base, cache }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<V, B, C> RectAccessor<V> for Cached<B, C>
where
    B: RectAccessor<V>,
{
    fn rect(&self, view: &V) -> Rect {
        self.base.rect(view)
    }
}

impl<V, B, C> RectMutator<V> for Cached<B, C>
where
    B: RectMutator<V>,
{
    fn set_rect(&self, view: &mut V, rect: Rect) {
        self.base.set_rect(view, rect)
    }
}

impl<V, B, C> FittingSizeMutator<V> for Cached<B, C>
where
    B: FittingSizeMutator<V>,
    C: SizeCache,
{
    fn fitting_size(&self, view: &V, available: Size) -> Size {
        if let Some(size) = self.cache.lookup(self.id) {
            trace!(id:% = self.id, size:?; "Fitting size cache hit");
            return size;
        }
        let size = self.base.fitting_size(view, available);
        trace!(id:% = self.id, size:?, available:?; "Fitting size cache miss");
        self.cache.store(self.id, size);
        size
    }
}
