//! Distribution strategies for sequences.
//!
//! A [`Distribution`] decides which rectangle each item of a sequence gets.
//! It never touches the view directly: it works through [`Sublayouts`], a
//! per-pass harness that exposes each item's fixed flags, lets the strategy
//! measure an item against any bounds ([`Sublayouts::rect`]) and hands a
//! final rectangle back ([`Sublayouts::place`]). Depending on the pass,
//! placing commits the item, grows a union, or records into a snapshot, so a
//! strategy is written once for every pass. While collecting, measuring an
//! item goes through [`Layout::measure_recorded`] so its references read the
//! snapshot.
//!
//! # Strategies
//!
//! - [`Enumerated`] - every item sees the whole bounds
//! - [`Linear`] - items stacked along an axis with spacing
//! - [`Radial`] - items centred on a circle
//! - [`Proportional`] - bounds split in proportion to measured extents

use std::f32::consts::TAU;

use log::{trace, warn};
use serde::Deserialize;

use trellis_core::{
    anchor::Axis,
    geometry::{Point, Rect},
};

use crate::{
    config::{RadialConfig, StackConfig},
    error::Result,
    node::Layout,
    snapshot::Snapshot,
};

/// What [`Sublayouts::place`] does with a rectangle.
///
/// A measure pass carries a snapshot when it runs on behalf of a collect pass,
/// so references keep resolving against the records.
pub(crate) enum Pass<'a, V> {
    Commit(&'a mut V),
    Measure {
        view: &'a V,
        snapshot: Option<&'a Snapshot>,
        union: Rect,
    },
    Collect {
        view: &'a V,
        snapshot: &'a mut Snapshot,
    },
}

/// Per-pass view of a sequence's items handed to a [`Distribution`].
pub struct Sublayouts<'a, V> {
    nodes: &'a [Box<dyn Layout<V>>],
    pass: Pass<'a, V>,
}

impl<'a, V> Sublayouts<'a, V> {
    pub(crate) fn new(nodes: &'a [Box<dyn Layout<V>>], pass: Pass<'a, V>) -> Self {
        Self { nodes, pass }
    }

    /// Union of every placed rectangle; [`Rect::NULL`] outside measure passes.
    pub(crate) fn union(&self) -> Rect {
        match self.pass {
            Pass::Measure { union, .. } => union,
            _ => Rect::NULL,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_fixed_width(&self, index: usize) -> bool {
        self.nodes[index].is_fixed_width()
    }

    pub fn is_fixed_height(&self, index: usize) -> bool {
        self.nodes[index].is_fixed_height()
    }

    /// Whether item `index` is fixed along `axis`.
    pub fn is_fixed(&self, index: usize, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.is_fixed_width(index),
            Axis::Vertical => self.is_fixed_height(index),
        }
    }

    /// Measures item `index` against `bounds` without placing it.
    ///
    /// While collecting, the item's references resolve against the snapshot.
    pub fn rect(&self, index: usize, bounds: Rect) -> Result<Rect> {
        let node = &self.nodes[index];
        match &self.pass {
            Pass::Commit(view) => node.measure(&**view, bounds),
            Pass::Measure {
                view,
                snapshot: None,
                ..
            } => node.measure(*view, bounds),
            Pass::Measure {
                view,
                snapshot: Some(snapshot),
                ..
            } => node.measure_recorded(*snapshot, *view, bounds),
            Pass::Collect { view, snapshot } => node.measure_recorded(&**snapshot, *view, bounds),
        }
    }

    /// Hands the final rectangle of item `index` to the pass.
    pub fn place(&mut self, index: usize, rect: Rect) -> Result<()> {
        let nodes = self.nodes;
        let node = &nodes[index];
        trace!(index, rect:?; "Placing sublayout");
        match &mut self.pass {
            Pass::Commit(view) => node.commit(&mut **view, rect),
            Pass::Measure { union, .. } => {
                *union = union.union(rect);
                Ok(())
            }
            Pass::Collect { view, snapshot } => node.record(&mut **snapshot, *view, rect),
        }
    }
}

/// A strategy that assigns each item of a sequence its rectangle.
///
/// Implementations call [`Sublayouts::place`] once per item, in any order.
pub trait Distribution {
    fn distribute<V>(&self, bounds: Rect, items: &mut Sublayouts<'_, V>) -> Result<()>;
}

/// Every item is measured against the whole bounds and placed where it lands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enumerated;

impl Distribution for Enumerated {
    fn distribute<V>(&self, bounds: Rect, items: &mut Sublayouts<'_, V>) -> Result<()> {
        for index in 0..items.len() {
            let rect = items.rect(index, bounds)?;
            items.place(index, rect)?;
        }
        Ok(())
    }
}

/// Placement of a linear run that does not fill its bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
}

/// Stacks items along an axis.
///
/// Fixed items keep their measured extent on the main axis. Flexible items
/// share what remains after fixed items and spacing, equally. Items are then
/// laid end to end starting at the bounds' origin, shifted by [`Justify`]
/// when nothing is flexible and space is left over. Cross-axis geometry is
/// the item's own measured one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    axis: Axis,
    spacing: f32,
    justify: Justify,
}

impl Linear {
    pub fn new(axis: Axis, spacing: f32) -> Self {
        Self {
            axis,
            spacing,
            justify: Justify::Start,
        }
    }

    pub fn horizontal(spacing: f32) -> Self {
        Self::new(Axis::Horizontal, spacing)
    }

    pub fn vertical(spacing: f32) -> Self {
        Self::new(Axis::Vertical, spacing)
    }

    pub fn from_config(config: &StackConfig) -> Self {
        Self::new(config.axis(), config.spacing()).with_justify(config.justify())
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }
}

impl Distribution for Linear {
    fn distribute<V>(&self, bounds: Rect, items: &mut Sublayouts<'_, V>) -> Result<()> {
        let count = items.len();
        if count == 0 {
            return Ok(());
        }
        let axis = self.axis;

        let mut measured = Vec::with_capacity(count);
        let mut fixed_extent = 0.0f32;
        let mut flexible_count = 0usize;
        for index in 0..count {
            let rect = items.rect(index, bounds)?;
            if items.is_fixed(index, axis) {
                fixed_extent += rect.extent(axis);
            } else {
                flexible_count += 1;
            }
            measured.push(rect);
        }

        let available = bounds.extent(axis);
        let spacing = self.spacing * (count - 1) as f32;
        let remainder = (available - fixed_extent - spacing).max(0.0);
        let flexible_extent = if flexible_count > 0 {
            remainder / flexible_count as f32
        } else {
            0.0
        };
        let leftover = if flexible_count > 0 { 0.0 } else { remainder };
        let mut offset = bounds.start(axis)
            + match self.justify {
                Justify::Start => 0.0,
                Justify::Center => leftover / 2.0,
                Justify::End => leftover,
            };
        trace!(axis:?, count, fixed_extent, flexible_extent, offset; "Distributing linear stack");

        for (index, rect) in measured.into_iter().enumerate() {
            let extent = if items.is_fixed(index, axis) {
                rect.extent(axis)
            } else {
                flexible_extent
            };
            items.place(index, rect.with_start(axis, offset).with_extent(axis, extent))?;
            offset += extent + self.spacing;
        }
        Ok(())
    }
}

/// Centres items on a circle inside the bounds.
///
/// Item `i` of `n` sits at angle `start_angle + i × 2π/n` (radians, 0 is
/// straight up, clockwise) on a circle of radius
/// `min(width, height) × radius_scale` around the bounds' centre. Each item
/// keeps its measured size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radial {
    start_angle: f32,
    radius_scale: f32,
}

impl Radial {
    pub fn new(start_angle: f32, radius_scale: f32) -> Self {
        Self {
            start_angle,
            radius_scale,
        }
    }

    pub fn from_config(config: &RadialConfig) -> Self {
        Self::new(config.start_angle_degrees().to_radians(), config.radius_scale())
    }
}

impl Default for Radial {
    fn default() -> Self {
        Self::new(0.0, 0.5)
    }
}

impl Distribution for Radial {
    fn distribute<V>(&self, bounds: Rect, items: &mut Sublayouts<'_, V>) -> Result<()> {
        let count = items.len();
        if count == 0 {
            return Ok(());
        }
        let radius = bounds.width().min(bounds.height()) * self.radius_scale;
        let step = TAU / count as f32;
        let center = bounds.center();

        for index in 0..count {
            let angle = self.start_angle + step * index as f32;
            let anchor = center.add_point(Point::new(0.0, -radius).rotate(angle));
            let rect = items.rect(index, bounds)?;
            items.place(index, Rect::from_center(anchor, rect.size()))?;
        }
        Ok(())
    }
}

/// Splits the bounds along an axis in proportion to each item's measured extent.
///
/// Each item gets the full cross-axis extent of the bounds. When every
/// measured extent is zero, the bounds are split equally.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Proportional {
    axis: Axis,
}

impl Proportional {
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }
}

impl Distribution for Proportional {
    fn distribute<V>(&self, bounds: Rect, items: &mut Sublayouts<'_, V>) -> Result<()> {
        let count = items.len();
        if count == 0 {
            return Ok(());
        }
        let axis = self.axis;

        let extents = (0..count)
            .map(|index| items.rect(index, bounds).map(|rect| rect.extent(axis).max(0.0)))
            .collect::<Result<Vec<_>>>()?;
        let total: f32 = extents.iter().sum();
        let available = bounds.extent(axis);
        if total <= 0.0 {
            warn!(count, axis:?; "All proportional items measured empty, splitting equally");
        }

        let mut offset = bounds.start(axis);
        for (index, extent) in extents.into_iter().enumerate() {
            let share = if total > 0.0 {
                available * extent / total
            } else {
                available / count as f32
            };
            items.place(index, bounds.with_start(axis, offset).with_extent(axis, share))?;
            offset += share;
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        binding::{ElementTable, Slot},
        placement::Placement,
        scheme::{Dimension, Scheme},
    };

    struct Strip {
        frames: Vec<Rect>,
    }

    impl ElementTable for Strip {
        type Key = usize;

        fn frame(&self, key: usize) -> Rect {
            self.frames[key]
        }

        fn set_frame(&mut self, key: usize, rect: Rect) {
            self.frames[key] = rect;
        }
    }

    fn weighted(extents: &[f32]) -> (Vec<Box<dyn Layout<Strip>>>, Strip) {
        let nodes = extents
            .iter()
            .enumerate()
            .map(|(key, extent)| {
                Box::new(
                    Placement::new(Slot(key))
                        .with_scheme(Scheme::new().height(Dimension::Constant(*extent))),
                ) as Box<dyn Layout<Strip>>
            })
            .collect();
        let strip = Strip {
            frames: vec![Rect::default(); extents.len()],
        };
        (nodes, strip)
    }

    /// Proportional shares tile the bounds exactly, without gaps or overlap.
    fn check_proportional_tiles_bounds(
        extents: Vec<f32>,
        height: f32,
    ) -> Result<(), TestCaseError> {
        let (nodes, mut strip) = weighted(&extents);
        let bounds = Rect::new(0.0, 0.0, 10.0, height);

        let mut items = Sublayouts::new(&nodes, Pass::Commit(&mut strip));
        Proportional::new(Axis::Vertical)
            .distribute(bounds, &mut items)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let mut cursor = 0.0;
        for frame in &strip.frames {
            prop_assert!(approx_eq!(f32, frame.min_y(), cursor, epsilon = 0.01));
            cursor = frame.max_y();
        }
        prop_assert!(approx_eq!(f32, cursor, height, epsilon = 0.05));
        Ok(())
    }

    proptest! {
        #[test]
        fn proportional_tiles_bounds(
            extents in prop::collection::vec(0.0f32..100.0, 1..8),
            height in 1.0f32..1000.0,
        ) {
            check_proportional_tiles_bounds(extents, height)?;
        }
    }
}
