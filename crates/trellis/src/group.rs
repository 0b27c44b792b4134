//! Ordered groups of child nodes.

use trellis_core::{geometry::Rect, identifier::NodeId};

use crate::{
    error::Result,
    node::{Layout, LayoutExt},
    snapshot::Snapshot,
};

/// A sequence of child nodes evaluated in order against the same source.
///
/// - Measuring yields the union of the children's rectangles
///   ([`Rect::NULL`] for an empty group).
/// - Collecting records the group's *source* under its id, not the union, so
///   an identified group can serve as a named anchor for its input.
pub struct Group<V> {
    id: Option<NodeId>,
    children: Vec<Box<dyn Layout<V>>>,
}

impl<V> Group<V> {
    pub fn new() -> Self {
        Self {
            id: None,
            children: Vec::new(),
        }
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

    /// Appends a child already boxed.
    pub fn push(&mut self, node: Box<dyn Layout<V>>) {
        self.children.push(node);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<V> Default for Group<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<Box<dyn Layout<V>>> for Group<V> {
    fn from_iter<I: IntoIterator<Item = Box<dyn Layout<V>>>>(iter: I) -> Self {
        Self {
            id: None,
            children: iter.into_iter().collect(),
        }
    }
}

impl<V> Layout<V> for Group<V> {
    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn measure(&self, view: &V, source: Rect) -> Result<Rect> {
        self.children.iter().try_fold(Rect::NULL, |union, child| {
            Ok(union.union(child.measure(view, source)?))
        })
    }

    fn measure_recorded(&self, snapshot: &Snapshot, view: &V, source: Rect) -> Result<Rect> {
        self.children.iter().try_fold(Rect::NULL, |union, child| {
            Ok(union.union(child.measure_recorded(snapshot, view, source)?))
        })
    }

    fn commit(&self, view: &mut V, rect: Rect) -> Result<()> {
        for child in &self.children {
            child.layout(view, rect)?;
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
        for child in &self.children {
            child.collect(snapshot, view, source)?;
        }
        Ok(())
    }

    fn apply(&self, snapshot: &Snapshot, view: &mut V) -> Result<()> {
        for child in &self.children {
            child.apply(snapshot, view)?;
        }
        Ok(())
    }
}

impl<V> LayoutExt for Group<V> {}
