//! Screen/normalized coordinate conversion.
//!
//! The editor never measures a rendering surface itself. The host injects a
//! [`ViewportProvider`] that reports the current on-screen size of the base
//! image, and every pixel tolerance is converted through it, so zone
//! geometry stays independent of the render scale.

use serde::{Deserialize, Serialize};

use crate::config::GeometryConfig;
use crate::model::{NormPoint, Rect, ScreenPoint};

/// Size of the image as currently rendered on screen, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedSize {
    pub width: f64,
    pub height: f64,
}

impl RenderedSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rendered size of an image scaled to fit `max_width` while keeping its aspect ratio.
    pub fn fit_width(natural: NaturalSize, max_width: f64) -> Self {
        let scale = max_width / f64::from(natural.width.max(1));
        Self::new(
            f64::from(natural.width) * scale,
            f64::from(natural.height) * scale,
        )
    }

    /// A usable size has two positive finite dimensions.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert a rendered pixel position into normalized image coordinates.
    pub fn to_normalized(&self, point: ScreenPoint) -> NormPoint {
        NormPoint::new(point.x / self.width, point.y / self.height)
    }

    /// Convert a normalized position back into rendered pixels.
    pub fn to_screen(&self, point: NormPoint) -> ScreenPoint {
        ScreenPoint::new(point.x * self.width, point.y * self.height)
    }

    /// Convert a pixel delta into a normalized delta.
    pub fn delta_to_normalized(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.width, dy / self.height)
    }

    /// Convert a normalized rectangle into rendered pixels `(x, y, width, height)`.
    pub fn rect_to_screen(&self, rect: &Rect) -> (f64, f64, f64, f64) {
        (
            rect.left * self.width,
            rect.top * self.height,
            rect.width * self.width,
            rect.height * self.height,
        )
    }
}

/// Unscaled pixel size of the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a normalized rectangle into natural image pixels `(x, y, width, height)`.
    pub fn rect_to_pixels(&self, rect: &Rect) -> (f64, f64, f64, f64) {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        (rect.left * w, rect.top * h, rect.width * w, rect.height * h)
    }
}

/// Capability that reports the rendered size of the base image.
///
/// Returns `None` while the image has not been laid out yet; the editor
/// ignores pointer input until a size is available.
pub trait ViewportProvider {
    fn rendered_size(&self) -> Option<RenderedSize>;
}

impl ViewportProvider for RenderedSize {
    fn rendered_size(&self) -> Option<RenderedSize> {
        Some(*self).filter(RenderedSize::is_usable)
    }
}

impl<F> ViewportProvider for F
where
    F: Fn() -> Option<RenderedSize>,
{
    fn rendered_size(&self) -> Option<RenderedSize> {
        self().filter(RenderedSize::is_usable)
    }
}

/// Pixel tolerances converted to normalized units for one rendered size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Minimum zone width.
    pub min_width: f64,
    /// Minimum zone height.
    pub min_height: f64,
    /// Snap distance along x.
    pub snap_x: f64,
    /// Snap distance along y.
    pub snap_y: f64,
    /// Perpendicular proximity along x that still allows snapping of horizontal edges.
    pub perpendicular_x: f64,
    /// Perpendicular proximity along y that still allows snapping of vertical edges.
    pub perpendicular_y: f64,
}

impl Tolerances {
    /// Convert the configured pixel tolerances for the given rendered size.
    pub fn new(config: &GeometryConfig, size: RenderedSize) -> Self {
        Self {
            min_width: config.min_zone_size_px / size.width,
            min_height: config.min_zone_size_px / size.height,
            snap_x: config.snap_threshold_px / size.width,
            snap_y: config.snap_threshold_px / size.height,
            perpendicular_x: config.snap_perpendicular_px / size.width,
            perpendicular_y: config.snap_perpendicular_px / size.height,
        }
    }
}
