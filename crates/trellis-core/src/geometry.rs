//! Geometric primitives for layout evaluation.
//!
//! This module provides the value types every layout step reads and writes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in layout space
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An origin plus a size, with a [`Rect::NULL`] sentinel
//! - [`Insets`] - Per-side amounts used to shrink or grow a rectangle
//!
//! # Coordinate System
//!
//! Trellis uses a top-left origin, matching most screen coordinate systems:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! "Min" edges are therefore the left and top edges, "max" edges the right
//! and bottom ones.

use crate::anchor::{Anchor, Axis, Edge};

/// A 2D point representing a position in layout coordinate space.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Returns the coordinate along `axis`
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Rotates the point around the origin by `radians`, clockwise on screen.
    ///
    /// Because Y grows downward, a positive angle turns `(0, -1)` (straight
    /// up) toward `(1, 0)` (right).
    pub fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the extent along `axis`
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Multiplies both dimension by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle described by its top-left origin and its size.
///
/// [`Rect::NULL`] is the "no rectangle" sentinel: it has an infinite origin
/// and zero size, and acts as the identity of [`Rect::union`]. Unions over
/// nothing (an empty group, an empty snapshot) therefore yield `NULL`.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Rect;
/// let header = Rect::new(0.0, 0.0, 100.0, 30.0);
/// let content = Rect::new(10.0, 40.0, 120.0, 80.0);
///
/// let combined = header.union(content);
/// assert_eq!(combined, Rect::new(0.0, 0.0, 130.0, 120.0));
/// assert_eq!(Rect::NULL.union(header), header);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// The null rectangle: an infinite origin with zero size.
    pub const NULL: Rect = Rect {
        x: f32::INFINITY,
        y: f32::INFINITY,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a rectangle from its origin coordinates and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from a top-left point and a size
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Creates a rectangle of `size` centered on `center`
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Returns true for the [`Rect::NULL`] sentinel
    pub fn is_null(self) -> bool {
        self.x.is_infinite() || self.y.is_infinite()
    }

    /// Returns true if the rectangle is null or has no area
    pub fn is_empty(self) -> bool {
        self.is_null() || self.width <= 0.0 || self.height <= 0.0
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the top-left corner
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the dimensions
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min_x(self) -> f32 {
        self.x
    }

    pub fn mid_x(self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn max_x(self) -> f32 {
        self.x + self.width
    }

    pub fn min_y(self) -> f32 {
        self.y
    }

    pub fn mid_y(self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn max_y(self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Returns a copy with the given origin, keeping the size
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.x = origin.x;
        self.y = origin.y;
        self
    }

    /// Returns a copy with the given size, keeping the origin
    pub fn with_size(mut self, size: Size) -> Self {
        self.width = size.width;
        self.height = size.height;
        self
    }

    /// Returns the origin coordinate along `axis`
    pub fn start(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Returns a copy whose origin coordinate along `axis` is `value`
    pub fn with_start(mut self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
        self
    }

    /// Returns the extent (width or height) along `axis`
    pub fn extent(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Returns a copy whose extent along `axis` is `value`; the origin is kept
    pub fn with_extent(mut self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
        self
    }

    /// Returns the coordinate of `edge`
    pub fn edge(self, edge: Edge) -> f32 {
        let axis = edge.axis();
        let start = self.start(axis);
        let extent = self.extent(axis);
        match edge.anchor() {
            Anchor::Min => start,
            Anchor::Mid => start + extent / 2.0,
            Anchor::Max => start + extent,
        }
    }

    /// Translates the rectangle along the edge's axis so that `edge` lies at `value`.
    ///
    /// The size is preserved.
    pub fn with_edge(self, edge: Edge, value: f32) -> Self {
        let axis = edge.axis();
        let delta = value - self.edge(edge);
        self.with_start(axis, self.start(axis) + delta)
    }

    /// Moves `edge` to `value` while the opposite edge stays in place.
    ///
    /// A `Mid` edge has no opposite edge, so it is translated instead.
    pub fn stretch_edge(self, edge: Edge, value: f32) -> Self {
        let axis = edge.axis();
        match edge.anchor() {
            Anchor::Min => {
                let max = self.start(axis) + self.extent(axis);
                self.with_start(axis, value).with_extent(axis, max - value)
            }
            Anchor::Mid => self.with_edge(edge, value),
            Anchor::Max => self.with_extent(axis, value - self.start(axis)),
        }
    }

    /// Returns the smallest rectangle containing both rectangles.
    ///
    /// [`Rect::NULL`] is the identity on both sides.
    pub fn union(self, other: Rect) -> Self {
        if self.is_null() {
            return other;
        }
        if other.is_null() {
            return self;
        }
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Moves the rectangle by the specified offset; the size is unchanged
    pub fn translate(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }

    /// Shrinks the rectangle by `insets`; negative insets grow it
    pub fn inset(self, insets: Insets) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: self.width - insets.horizontal_sum(),
            height: self.height - insets.vertical_sum(),
        }
    }
}

/// Represents spacing around an element with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Creates insets with `horizontal` on the left/right and `vertical` on the top/bottom
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
