//! Trellis Core Types
//!
//! This crate provides the foundational value types of the Trellis layout
//! engine. It includes:
//!
//! - **Geometry**: Points, sizes, rectangles and insets ([`geometry`] module)
//! - **Anchors**: Axes, anchors and named edges ([`anchor`] module)
//! - **Rect algebra**: Composable rectangle transforms ([`scheme`] module)
//! - **Identifiers**: Stable node identifiers ([`identifier::NodeId`])

pub mod anchor;
pub mod geometry;
pub mod identifier;
pub mod scheme;
