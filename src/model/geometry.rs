//! Core geometry types.
//!
//! Two coordinate spaces exist side by side: [`ScreenPoint`] is a pointer
//! position in pixels relative to the rendered image box, while [`NormPoint`]
//! and [`Rect`] live in normalized image space where `(0, 0)` is the top-left
//! and `(1, 1)` the bottom-right corner of the image.

use serde::{Deserialize, Serialize};

/// A pointer position in rendered pixels, relative to the image's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pixel offset from `origin` to this point.
    pub fn delta_from(&self, origin: ScreenPoint) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// A point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

impl NormPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in normalized image coordinates.
///
/// Only the top-left corner and the size are stored; `right` and `bottom`
/// are always derived so they can never drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build a rectangle from its four edges.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Build the rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: NormPoint, b: NormPoint) -> Self {
        Self::from_edges(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, point: NormPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Whether the vertical extents of both rectangles overlap.
    ///
    /// The shared span must have positive length; rectangles that merely
    /// touch along a horizontal edge do not overlap.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top < other.bottom() && other.top < self.bottom()
    }

    /// Whether the horizontal extents of both rectangles overlap.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left < other.right() && other.left < self.right()
    }

    /// Smallest distance between any vertical edge of `self` and any vertical edge of `other`.
    pub fn min_horizontal_edge_distance(&self, other: &Rect) -> f64 {
        [
            (self.left - other.left).abs(),
            (self.left - other.right()).abs(),
            (self.right() - other.left).abs(),
            (self.right() - other.right()).abs(),
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }

    /// Smallest distance between any horizontal edge of `self` and any horizontal edge of `other`.
    pub fn min_vertical_edge_distance(&self, other: &Rect) -> f64 {
        [
            (self.top - other.top).abs(),
            (self.top - other.bottom()).abs(),
            (self.bottom() - other.top).abs(),
            (self.bottom() - other.bottom()).abs(),
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }

    /// Whether all four edges are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}
