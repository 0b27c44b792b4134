//! Stable identifiers for layout nodes.
//!
//! A [`NodeId`] names a node for cross-referencing through a snapshot and for
//! keying the fitting-size cache.

use std::fmt;

/// Stable identifier of a layout node.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::NodeId;
///
/// let list = NodeId::new(10);
/// assert_eq!(list.offset(3), NodeId::new(13));
/// assert_eq!(list.to_string(), "#10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Derives the identifier `index` steps after this one.
    ///
    /// Data-driven sequences use this to give every generated item its own id.
    pub const fn offset(self, index: usize) -> Self {
        Self(self.0 + index)
    }
}

impl From<usize> for NodeId {
    fn from(raw: usize) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
