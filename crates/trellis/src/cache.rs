//! Fitting-size cache.
//!
//! The cache is owned by the host and shared with the nodes that read it
//! through [`Rc`](std::rc::Rc). Entries are keyed only by [`NodeId`], never by
//! the available size, so the host must invalidate whenever the size domain
//! changes. Nothing in the engine invalidates on its own.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use log::debug;

use trellis_core::{geometry::Size, identifier::NodeId};

/// Identifier-keyed store of previously computed fitting sizes.
pub trait SizeCache {
    fn lookup(&self, id: NodeId) -> Option<Size>;

    fn store(&self, id: NodeId, size: Size);

    /// Drops every entry.
    fn invalidate_all(&self);
}

/// The provided [`SizeCache`]: a hash map behind a [`RefCell`].
///
/// It also remembers the last bounds the host laid out in, so a host can
/// call [`FittingSizeCache::invalidate_if_resized`] at the top of every pass.
///
/// # Examples
///
/// ```
/// # use trellis::{FittingSizeCache, SizeCache, geometry::Size, identifier::NodeId};
/// let cache = FittingSizeCache::new();
/// cache.store(NodeId::new(1), Size::new(10.0, 10.0));
///
/// assert!(!cache.invalidate_if_resized(Size::new(320.0, 480.0)));
/// assert_eq!(cache.lookup(NodeId::new(1)), Some(Size::new(10.0, 10.0)));
///
/// assert!(cache.invalidate_if_resized(Size::new(480.0, 320.0)));
/// assert_eq!(cache.lookup(NodeId::new(1)), None);
/// ```
#[derive(Debug, Default)]
pub struct FittingSizeCache {
    sizes: RefCell<HashMap<NodeId, Size>>,
    last_bounds: Cell<Option<Size>>,
}

impl FittingSizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sizes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.borrow().is_empty()
    }

    /// Returns the bounds passed to the last [`FittingSizeCache::invalidate_if_resized`] call.
    pub fn last_bounds(&self) -> Option<Size> {
        self.last_bounds.get()
    }

    /// Records `bounds` and clears the cache if they differ from the last ones.
    ///
    /// The first call only records. Returns whether the cache was cleared.
    pub fn invalidate_if_resized(&self, bounds: Size) -> bool {
        let previous = self.last_bounds.replace(Some(bounds));
        match previous {
            Some(previous) if previous != bounds => {
                debug!(
                    previous:?, bounds:?, entries = self.len();
                    "Bounds changed, invalidating size cache"
                );
                self.invalidate_all();
                true
            }
            _ => false,
        }
    }
}

impl SizeCache for FittingSizeCache {
    fn lookup(&self, id: NodeId) -> Option<Size> {
        self.sizes.borrow().get(&id).copied()
    }

    fn store(&self, id: NodeId, size: Size) {
        self.sizes.borrow_mut().insert(id, size);
    }

    fn invalidate_all(&self) {
        self.sizes.borrow_mut().clear();
    }
}
