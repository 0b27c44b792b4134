//! Error types for layout evaluation.
//!
//! Every failure here is an authoring error in the layout tree or its
//! configuration. Degenerate geometry (zero or negative sizes, null sources)
//! is never an error.

use thiserror::Error;

use trellis_core::identifier::NodeId;

/// The error type returned by every evaluation entry point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A constraint or an apply step looked up an id that is not in the snapshot.
    ///
    /// Either the referenced node is declared after the referencing one, or it
    /// never carried that id.
    #[error("Unresolved reference: node {0} has not been recorded in the snapshot")]
    UnresolvedReference(NodeId),

    /// A node needs an identifier for `operation` but was built without one.
    #[error("Missing identifier: {node} needs an id to {operation}")]
    MissingIdentifier {
        node: &'static str,
        operation: &'static str,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl LayoutError {
    /// Builds a [`LayoutError::MissingIdentifier`] naming the node type `L`.
    pub fn missing_identifier<L: ?Sized>(operation: &'static str) -> Self {
        let full = std::any::type_name::<L>();
        // Strip the module path and generic arguments for readability
        let base = full.split('<').next().unwrap_or(full);
        let node = base.rsplit("::").next().unwrap_or(base);
        Self::MissingIdentifier { node, operation }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
