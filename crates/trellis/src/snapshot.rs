//! Per-pass record of computed rectangles.
//!
//! A [`Snapshot`] maps node identifiers to the rectangles computed for them
//! during the collect phase. Later nodes in the same pass read it to resolve
//! cross-references; the apply phase replays it onto the host's elements.

use indexmap::IndexMap;
use log::trace;

use trellis_core::{geometry::Rect, identifier::NodeId};

use crate::error::{LayoutError, Result};

/// Insertion-ordered map from [`NodeId`] to computed [`Rect`].
///
/// # Examples
///
/// ```
/// # use trellis::{Snapshot, geometry::Rect, identifier::NodeId};
/// let mut snapshot = Snapshot::new();
/// assert!(snapshot.union_rect().is_null());
///
/// snapshot.insert(NodeId::new(0), Rect::new(0.0, 0.0, 50.0, 50.0));
/// snapshot.insert(NodeId::new(1), Rect::new(0.0, 50.0, 50.0, 50.0));
/// assert_eq!(snapshot.union_rect(), Rect::new(0.0, 0.0, 50.0, 100.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    rects: IndexMap<NodeId, Rect>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot seeded with rectangles computed elsewhere.
    ///
    /// Seeded entries take part in reference resolution and in
    /// [`Snapshot::union_rect`] like any recorded entry.
    pub fn with_prepared(prepared: impl IntoIterator<Item = (NodeId, Rect)>) -> Self {
        Self {
            rects: prepared.into_iter().collect(),
        }
    }

    /// Records `rect` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        trace!(id:%, rect:?; "Recorded rect");
        self.rects.insert(id, rect);
    }

    pub fn get(&self, id: NodeId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Looks up `id`, failing with [`LayoutError::UnresolvedReference`] when absent.
    pub fn resolve(&self, id: NodeId) -> Result<Rect> {
        self.get(id).ok_or(LayoutError::UnresolvedReference(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.rects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Iterates entries in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.rects.iter().map(|(id, rect)| (*id, *rect))
    }

    /// Returns the bounding box of every entry, or [`Rect::NULL`] when empty.
    pub fn union_rect(&self) -> Rect {
        self.rects
            .values()
            .fold(Rect::NULL, |union, rect| union.union(*rect))
    }
}
