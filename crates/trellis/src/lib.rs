//! Trellis - A declarative, composable layout engine.
//!
//! Layouts are trees of small nodes built once and evaluated many times
//! against a host-owned view `V`. Leaves bind to the host's elements through
//! accessors, composites arrange their children, and every node supports the
//! same three passes: commit, measure, and snapshot (collect then apply).
//!
//! # Examples
//!
//! ```rust
//! use trellis::{Layout, Placement, binding::Accessor, engine};
//! use trellis::{geometry::Rect, scheme::{Dimension, Scheme}};
//!
//! struct Screen {
//!     banner: Rect,
//! }
//!
//! let banner = Placement::new(Accessor::new(
//!     |screen: &Screen| screen.banner,
//!     |screen: &mut Screen, rect| screen.banner = rect,
//! ))
//! .with_scheme(
//!     Scheme::new()
//!         .width(Dimension::Scaled(1.0))
//!         .height(Dimension::Scaled(0.5))
//!         .center_y()
//!         .right(0.0),
//! );
//!
//! let mut screen = Screen { banner: Rect::default() };
//! engine::evaluate(&banner, &mut screen, Rect::new(0.0, 0.0, 320.0, 100.0))
//!     .expect("Failed to lay out");
//! assert_eq!(screen.banner, Rect::new(0.0, 25.0, 320.0, 50.0));
//! ```

pub mod binding;
pub mod cache;
pub mod config;
pub mod constraints;
pub mod distribution;
pub mod engine;
pub mod group;
pub mod node;
pub mod placement;
pub mod sequence;
pub mod snapshot;

mod error;

pub use trellis_core::{anchor, geometry, identifier, scheme};

pub use cache::{FittingSizeCache, SizeCache};
pub use constraints::{Constrained, Reference};
pub use distribution::{Distribution, Enumerated, Justify, Linear, Proportional, Radial};
pub use error::{LayoutError, Result};
pub use group::Group;
pub use node::{Either, Empty, Layout, LayoutExt, Resizing};
pub use placement::{FittingPlacement, Placement};
pub use sequence::{ForEach, Reduce, Stack};
pub use snapshot::Snapshot;
