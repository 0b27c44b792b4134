//! Repeated and distributed sequences.
//!
//! - [`ForEach`] builds one subtree per data item and evaluates each against
//!   the same source.
//! - [`Reduce`] builds one subtree per data item and lets a [`Distribution`]
//!   decide what rectangle each one gets.
//! - [`Stack`] distributes a fixed list of heterogeneous children with a
//!   [`Linear`] strategy.
//!
//! All three measure to the union of their items and, when they carry an id,
//! record their source rectangle under it while collecting.
//!
//! Data-driven items are rebuilt on every pass, so a factory must be cheap
//! and deterministic. Items that need ids conventionally derive them from the
//! sequence's id with [`NodeId::offset`]`(1 + index)`.

use log::trace;

use trellis_core::{geometry::Rect, identifier::NodeId};

use crate::{
    config::StackConfig,
    distribution::{Distribution, Enumerated, Linear, Pass, Sublayouts},
    error::Result,
    node::{Layout, LayoutExt},
    snapshot::Snapshot,
};

type Factory<V, T> = Box<dyn Fn(usize, &T) -> Box<dyn Layout<V>>>;

fn boxed_factory<V, T, L, F>(factory: F) -> Factory<V, T>
where
    F: Fn(usize, &T) -> L + 'static,
    L: Layout<V> + 'static,
{
    Box::new(move |index: usize, item: &T| -> Box<dyn Layout<V>> {
        Box::new(factory(index, item))
    })
}

fn measure_distributed<V, D: Distribution>(
    distribution: &D,
    nodes: &[Box<dyn Layout<V>>],
    snapshot: Option<&Snapshot>,
    view: &V,
    source: Rect,
) -> Result<Rect> {
    let mut items = Sublayouts::new(
        nodes,
        Pass::Measure {
            view,
            snapshot,
            union: Rect::NULL,
        },
    );
    distribution.distribute(source, &mut items)?;
    Ok(items.union())
}

fn commit_distributed<V, D: Distribution>(
    distribution: &D,
    nodes: &[Box<dyn Layout<V>>],
    view: &mut V,
    bounds: Rect,
) -> Result<()> {
    let mut items = Sublayouts::new(nodes, Pass::Commit(view));
    distribution.distribute(bounds, &mut items)
}

fn collect_distributed<V, D: Distribution>(
    distribution: &D,
    nodes: &[Box<dyn Layout<V>>],
    id: Option<NodeId>,
    snapshot: &mut Snapshot,
    view: &V,
    source: Rect,
) -> Result<()> {
    if let Some(id) = id {
        snapshot.insert(id, source);
    }
    trace!(id:?, items = nodes.len(), source:?; "Collecting distributed sequence");
    let mut items = Sublayouts::new(nodes, Pass::Collect { view, snapshot });
    distribution.distribute(source, &mut items)
}

fn apply_all<V>(nodes: &[Box<dyn Layout<V>>], snapshot: &Snapshot, view: &mut V) -> Result<()> {
    for node in nodes {
        node.apply(snapshot, view)?;
    }
    Ok(())
}

/// One subtree per data item, each evaluated against the same source.
pub struct ForEach<V, T> {
    id: Option<NodeId>,
    data: Vec<T>,
    factory: Factory<V, T>,
}

impl<V, T> ForEach<V, T> {
    /// Creates a sequence calling `factory(index, item)` for every item.
    pub fn new<L, F>(data: impl IntoIterator<Item = T>, factory: F) -> Self
    where
        F: Fn(usize, &T) -> L + 'static,
        L: Layout<V> + 'static,
    {
        Self {
            id: None,
            data: data.into_iter().collect(),
            factory: boxed_factory(factory),
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn items(&self) -> impl Iterator<Item = Box<dyn Layout<V>>> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(index, item)| (self.factory)(index, item))
    }
}

impl<V, T> Layout<V> for ForEach<V, T> {
    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        self.items().try_fold(Rect::NULL, |union, item| {
            Ok(union.union(item.measure(view, source)?))
        })
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        self.items().try_fold(Rect::NULL, |union, item| {
            Ok(union.union(item.measure_recorded(snapshot, view, source)?))
        })
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        for item in self.items() {
            item.layout(view, rect)?;
        }
        Ok(())
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        self.commit(view, source)
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        self.collect(snapshot, view, rect)
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        if let Some(id) = self.id {
            snapshot.insert(id, source);
        }
        for item in self.items() {
            item.collect(snapshot, view, source)?;
        }
        Ok(())
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        for item in self.items() {
            item.apply(snapshot, view)?;
        }
        Ok(())
    }
}

impl<V, T> LayoutExt for ForEach<V, T> {}

/// One subtree per data item, arranged by a [`Distribution`].
///
/// # Examples
///
/// ```
/// # use trellis::{Layout, Placement, Reduce, binding::{ElementTable, Slot}};
/// # use trellis::{distribution::Radial, geometry::Rect, scheme::{Dimension, Scheme}};
/// struct Dial {
///     marks: Vec<Rect>,
/// }
///
/// impl ElementTable for Dial {
///     type Key = usize;
///     fn frame(&self, key: usize) -> Rect {
///         self.marks[key]
///     }
///     fn set_frame(&mut self, key: usize, rect: Rect) {
///         self.marks[key] = rect;
///     }
/// }
///
/// let marks = Reduce::new(0..4usize, Radial::default(), |_, key| {
///     Placement::new(Slot(*key)).with_scheme(
///         Scheme::new()
///             .width(Dimension::Constant(10.0))
///             .height(Dimension::Constant(10.0)),
///     )
/// });
///
/// let mut dial = Dial { marks: vec![Rect::default(); 4] };
/// marks.layout(&mut dial, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
/// assert_eq!(dial.marks[0], Rect::new(45.0, -5.0, 10.0, 10.0));
/// ```
pub struct Reduce<V, T, D> {
    id: Option<NodeId>,
    data: Vec<T>,
    factory: Factory<V, T>,
    distribution: D,
}

impl<V, T, D: Distribution> Reduce<V, T, D> {
    pub fn new<L, F>(data: impl IntoIterator<Item = T>, distribution: D, factory: F) -> Self
    where
        F: Fn(usize, &T) -> L + 'static,
        L: Layout<V> + 'static,
    {
        Self {
            id: None,
            data: data.into_iter().collect(),
            factory: boxed_factory(factory),
            distribution,
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    fn build(&self) -> Vec<Box<dyn Layout<V>>> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, item)| (self.factory)(index, item))
            .collect()
    }
}

impl<V, T> Reduce<V, T, Enumerated> {
    /// A reduce where every item sees the whole source.
    pub fn enumerated<L, F>(data: impl IntoIterator<Item = T>, factory: F) -> Self
    where
        F: Fn(usize, &T) -> L + 'static,
        L: Layout<V> + 'static,
    {
        Self::new(data, Enumerated, factory)
    }
}

impl<V, T, D: Distribution> Layout<V> for Reduce<V, T, D> {
    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        measure_distributed(&self.distribution, &self.build(), None, view, source)
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        let items = self.build();
        measure_distributed(&self.distribution, &items, Some(snapshot), view, source)
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        commit_distributed(&self.distribution, &self.build(), view, rect)
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        self.commit(view, source)
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        self.collect(snapshot, view, rect)
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        collect_distributed(&self.distribution, &self.build(), self.id, snapshot, view, source)
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        apply_all(&self.build(), snapshot, view)
    }
}

impl<V, T, D> LayoutExt for Reduce<V, T, D> {}

/// Heterogeneous children stacked along an axis.
///
/// # Examples
///
/// ```
/// # use trellis::{Layout, LayoutExt, Placement, Stack, binding::{ElementTable, Slot}};
/// # use trellis::{geometry::Rect, scheme::{Dimension, Scheme}};
/// struct Row {
///     cells: Vec<Rect>,
/// }
///
/// impl ElementTable for Row {
///     type Key = usize;
///     fn frame(&self, key: usize) -> Rect {
///         self.cells[key]
///     }
///     fn set_frame(&mut self, key: usize, rect: Rect) {
///         self.cells[key] = rect;
///     }
/// }
///
/// let icon = Placement::new(Slot(0))
///     .with_scheme(Scheme::new().width(Dimension::Constant(24.0)).height(Dimension::Scaled(1.0)))
///     .fixed_size();
/// let title = Placement::new(Slot(1)).with_scheme(Scheme::new().height(Dimension::Scaled(1.0)));
///
/// let row = Stack::horizontal(8.0).child(icon).child(title);
///
/// let mut cells = Row { cells: vec![Rect::default(); 2] };
/// row.layout(&mut cells, Rect::new(0.0, 0.0, 200.0, 24.0)).unwrap();
/// assert_eq!(cells.cells[1], Rect::new(32.0, 0.0, 168.0, 24.0));
/// ```
pub struct Stack<V> {
    id: Option<NodeId>,
    children: Vec<Box<dyn Layout<V>>>,
    distribution: Linear,
}

impl<V> Stack<V> {
    pub fn new(distribution: Linear) -> Self {
        Self {
            id: None,
            children: Vec::new(),
            distribution,
        }
    }

    pub fn horizontal(spacing: f32) -> Self {
        Self::new(Linear::horizontal(spacing))
    }

    pub fn vertical(spacing: f32) -> Self {
        Self::new(Linear::vertical(spacing))
    }

    pub fn from_config(config: &StackConfig) -> Self {
        Self::new(Linear::from_config(config))
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends a child.
    pub fn child(mut self, node: impl Layout<V> + 'static) -> Self {
        self.children.push(Box::new(node));
        self
    }

    pub fn push(&mut self, node: Box<dyn Layout<V>>) {
        self.children.push(node);
    }

    pub fn distribution(&self) -> &Linear {
        &self.distribution
    }
}

impl<V> Layout<V> for Stack<V> {
    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        measure_distributed(&self.distribution, &self.children, None, view, source)
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        measure_distributed(&self.distribution, &self.children, Some(snapshot), view, source)
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        commit_distributed(&self.distribution, &self.children, view, rect)
    }

    fn layout(&self, view: &mut V, source: Rect) -> Result<()> {
        self.commit(view, source)
    }

    fn record(&self, snapshot: &mut Snapshot, view: &V, rect: Rect) -> Result<()> {
        self.collect(snapshot, view, rect)
    }

    fn collect(&self, snapshot: &mut Snapshot, view: &V, source: Rect) -> Result<()> {
        collect_distributed(&self.distribution, &self.children, self.id, snapshot, view, source)
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        apply_all(&self.children, snapshot, view)
    }
}

impl<V> LayoutExt for Stack<V> {}
