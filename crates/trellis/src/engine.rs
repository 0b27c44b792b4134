//! Host-facing evaluation entry points.
//!
//! A host owns the view `V` and a layout tree built once for it. Each time
//! the container's bounds change it calls one of these functions:
//!
//! - [`evaluate`] lays the tree out in commit mode.
//! - [`measure`] computes the tree's rectangle without writing anything.
//! - [`snapshot`] records every identified node's rectangle.
//! - [`snapshot_then_apply`] records, then replays the records onto the view.
//! - [`size_that_fits`] answers an intrinsic-size query from a snapshot.

use log::debug;

use trellis_core::geometry::{Rect, Size};

use crate::{error::Result, node::Layout, snapshot::Snapshot};

/// Lays `layout` out within `bounds`, writing geometry as it goes.
pub fn evaluate<V, L>(layout: &L, view: &mut V, bounds: Rect) -> Result<()>
where
    L: Layout<V> + ?Sized,
{
    debug!(bounds:?; "Evaluating layout");
    layout.layout(view, bounds)
}

/// Computes the rectangle `layout` would occupy within `bounds`.
pub fn measure<V, L>(layout: &L, view: &V, bounds: Rect) -> Result<Rect>
where
    L: Layout<V> + ?Sized,
{
    debug!(bounds:?; "Measuring layout");
    layout.measure(view, bounds)
}

/// Collects every identified node's rectangle without touching the view.
pub fn snapshot<V, L>(layout: &L, view: &V, bounds: Rect) -> Result<Snapshot>
where
    L: Layout<V> + ?Sized,
{
    collect_into(layout, view, bounds, Snapshot::new())
}

/// Collects a snapshot and then commits it onto the view.
///
/// Equivalent to [`evaluate`] for every tree whose leaves carry ids. The
/// snapshot is returned so hosts can inspect or animate between records.
///
/// # Errors
///
/// Fails with [`LayoutError::MissingIdentifier`] when a leaf has no id.
///
/// [`LayoutError::MissingIdentifier`]: crate::LayoutError::MissingIdentifier
pub fn snapshot_then_apply<V, L>(layout: &L, view: &mut V, bounds: Rect) -> Result<Snapshot>
where
    L: Layout<V> + ?Sized,
{
    let snapshot = snapshot(layout, view, bounds)?;
    debug!(records = snapshot.len(); "Applying snapshot");
    layout.apply(&snapshot, view)?;
    Ok(snapshot)
}

/// Union of every rectangle recorded in `snapshot`.
pub fn union_rect(snapshot: &Snapshot) -> Rect {
    snapshot.union_rect()
}

/// Size of the union of everything `layout` records within `available`.
///
/// `prepared` seeds the snapshot, e.g. with rectangles of elements outside
/// the tree that constraints refer to; prepared entries count toward the
/// union. A tree that records nothing fits in [`Size::default`].
pub fn size_that_fits<V, L>(
    layout: &L,
    view: &V,
    available: Size,
    prepared: Snapshot,
) -> Result<Size>
where
    L: Layout<V> + ?Sized,
{
    let bounds = Rect::from_origin_size(Default::default(), available);
    let snapshot = collect_into(layout, view, bounds, prepared)?;
    let union = snapshot.union_rect();
    let size = if union.is_null() {
        Size::default()
    } else {
        union.size()
    };
    debug!(available:?, size:?; "Computed fitting size");
    Ok(size)
}

fn collect_into<V, L>(
    layout: &L,
    view: &V,
    bounds: Rect,
    mut snapshot: Snapshot,
) -> Result<Snapshot>
where
    L: Layout<V> + ?Sized,
{
    debug!(bounds:?, prepared = snapshot.len(); "Collecting snapshot");
    layout.collect(&mut snapshot, view, bounds)?;
    Ok(snapshot)
}
