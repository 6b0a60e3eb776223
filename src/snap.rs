//! Edge-to-edge magnetic snapping.
//!
//! Each of the four edges of a moving rectangle is matched independently
//! against the edges of every other zone and against the image boundary.
//! The closest qualifying candidate within the snap threshold wins.

use crate::model::{Edge, Rect, Zone, ZoneId};
use crate::viewport::Tolerances;

/// Best snap target found for each edge, in normalized units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapPoints {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

impl SnapPoints {
    /// Snap target for one edge.
    pub fn get(&self, edge: Edge) -> Option<f64> {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.right.is_none() && self.bottom.is_none()
    }
}

/// Running minimum of candidate positions for one edge.
#[derive(Debug, Clone, Copy)]
struct BestCandidate {
    threshold: f64,
    best: Option<(f64, f64)>,
}

impl BestCandidate {
    fn new(threshold: f64) -> Self {
        Self {
            threshold,
            best: None,
        }
    }

    /// Offer `target` for an edge currently at `current`.
    fn offer(&mut self, current: f64, target: f64) {
        let distance = (current - target).abs();
        if distance >= self.threshold {
            return;
        }
        match self.best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => self.best = Some((target, distance)),
        }
    }

    fn value(&self) -> Option<f64> {
        self.best.map(|(target, _)| target)
    }
}

/// Find the snap targets for `moving`.
///
/// `moving_id` excludes the zone being edited from the candidate set; pass
/// `None` for a zone that is not in the list yet.
pub fn find_snap_points<'a, I>(
    moving: &Rect,
    moving_id: Option<ZoneId>,
    zones: I,
    tolerances: &Tolerances,
) -> SnapPoints
where
    I: IntoIterator<Item = &'a Zone>,
{
    let mut left = BestCandidate::new(tolerances.snap_x);
    let mut right = BestCandidate::new(tolerances.snap_x);
    let mut top = BestCandidate::new(tolerances.snap_y);
    let mut bottom = BestCandidate::new(tolerances.snap_y);

    for zone in zones {
        if Some(zone.id) == moving_id {
            continue;
        }
        let other = &zone.bounds;

        // Vertical edges only snap to zones beside us, horizontal edges only
        // to zones above or below, unless the zones are already close.
        let allow_vertical_edges = moving.overlaps_vertically(other)
            || moving.min_vertical_edge_distance(other) < tolerances.perpendicular_y;
        let allow_horizontal_edges = moving.overlaps_horizontally(other)
            || moving.min_horizontal_edge_distance(other) < tolerances.perpendicular_x;

        if allow_vertical_edges {
            for target in [other.left, other.right()] {
                left.offer(moving.left, target);
                right.offer(moving.right(), target);
            }
        }
        if allow_horizontal_edges {
            for target in [other.top, other.bottom()] {
                top.offer(moving.top, target);
                bottom.offer(moving.bottom(), target);
            }
        }
    }

    left.offer(moving.left, 0.0);
    top.offer(moving.top, 0.0);
    right.offer(moving.right(), 1.0);
    bottom.offer(moving.bottom(), 1.0);

    let points = SnapPoints {
        left: left.value(),
        top: top.value(),
        right: right.value(),
        bottom: bottom.value(),
    };
    if !points.is_empty() {
        log::trace!("Snap points for {:?}: {:?}", moving_id, points);
    }
    points
}

/// Snap a translated rectangle: only its position changes, never its size.
pub fn snap_translation(rect: Rect, snaps: &SnapPoints) -> Rect {
    let mut out = rect;
    if let Some(left) = snaps.left {
        out.left = left;
    } else if let Some(right) = snaps.right {
        out.left = right - out.width;
    }
    if let Some(top) = snaps.top {
        out.top = top;
    } else if let Some(bottom) = snaps.bottom {
        out.top = bottom - out.height;
    }
    out
}

/// Snap a freshly drawn rectangle.
///
/// A snapped edge is pinned to its target while the opposite edge stays
/// where it was. The left/top edge takes precedence over right/bottom, and a
/// snap that would shrink the rectangle below the minimum size is skipped.
pub fn snap_free_edges(rect: Rect, snaps: &SnapPoints, tolerances: &Tolerances) -> Rect {
    let mut out = rect;
    for edge in [Edge::Left, Edge::Right] {
        if let Some(snapped) = pin_edge(out, edge, snaps, tolerances) {
            out = snapped;
            break;
        }
    }
    for edge in [Edge::Top, Edge::Bottom] {
        if let Some(snapped) = pin_edge(out, edge, snaps, tolerances) {
            out = snapped;
            break;
        }
    }
    out
}

/// Snap the single edge being dragged during a resize.
pub fn snap_edge(rect: Rect, edge: Edge, snaps: &SnapPoints, tolerances: &Tolerances) -> Rect {
    pin_edge(rect, edge, snaps, tolerances).unwrap_or(rect)
}

/// Move `edge` onto its snap target keeping the opposite edge fixed.
/// Returns `None` when there is no target or the result would be too small.
fn pin_edge(rect: Rect, edge: Edge, snaps: &SnapPoints, tolerances: &Tolerances) -> Option<Rect> {
    let target = snaps.get(edge)?;
    let pinned = match edge {
        Edge::Left => Rect::from_edges(target, rect.top, rect.right(), rect.bottom()),
        Edge::Right => Rect::new(rect.left, rect.top, target - rect.left, rect.height),
        Edge::Top => Rect::from_edges(rect.left, target, rect.right(), rect.bottom()),
        Edge::Bottom => Rect::new(rect.left, rect.top, rect.width, target - rect.top),
    };
    let too_small = if edge.is_vertical() {
        pinned.width < tolerances.min_width
    } else {
        pinned.height < tolerances.min_height
    };
    if too_small { None } else { Some(pinned) }
}
