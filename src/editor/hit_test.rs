//! Pointer hit-testing against zone overlays.
//!
//! Each zone exposes five interactive regions: its body, which starts a
//! drag, and a thin strip along every edge, which starts a resize of that
//! edge. Later zones are drawn on top, so they are tested first.

use serde::{Deserialize, Serialize};

use crate::model::{Edge, Rect, ScreenPoint, Zone, ZoneId};
use crate::viewport::RenderedSize;

/// Interactive part of a zone overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitRegion {
    /// Interior of the zone.
    Body,
    /// Resize handle along one edge.
    Edge(Edge),
}

/// Result of a hit-test: which zone and which part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneHit {
    pub zone_id: ZoneId,
    pub region: HitRegion,
}

/// A region's box in rendered pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBox {
    pub region: HitRegion,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionBox {
    fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Pixel boxes of the five regions of `rect`, edge handles first.
///
/// Handles straddle their edge and extend `handle_px` on both sides of it.
pub fn region_boxes(rect: &Rect, size: RenderedSize, handle_px: f64) -> [RegionBox; 5] {
    let (x, y, w, h) = size.rect_to_screen(rect);
    let m = handle_px;
    [
        RegionBox {
            region: HitRegion::Edge(Edge::Top),
            x,
            y: y - m,
            width: w,
            height: 2.0 * m,
        },
        RegionBox {
            region: HitRegion::Edge(Edge::Left),
            x: x - m,
            y,
            width: 2.0 * m,
            height: h,
        },
        RegionBox {
            region: HitRegion::Edge(Edge::Right),
            x: x + w - m,
            y,
            width: 2.0 * m,
            height: h,
        },
        RegionBox {
            region: HitRegion::Edge(Edge::Bottom),
            x,
            y: y + h - m,
            width: w,
            height: 2.0 * m,
        },
        RegionBox {
            region: HitRegion::Body,
            x,
            y,
            width: w,
            height: h,
        },
    ]
}

/// Find the topmost zone region under `point`.
///
/// `overrides` replaces the geometry of one zone, used for the selected zone
/// whose working copy may differ from the list while it is being edited.
pub fn hit_test(
    zones: &[Zone],
    overrides: Option<&Zone>,
    point: ScreenPoint,
    size: RenderedSize,
    handle_px: f64,
) -> Option<ZoneHit> {
    zones.iter().rev().find_map(|zone| {
        let bounds = match overrides {
            Some(selected) if selected.id == zone.id => &selected.bounds,
            _ => &zone.bounds,
        };
        region_boxes(bounds, size, handle_px)
            .iter()
            .find(|b| b.contains(point))
            .map(|b| ZoneHit {
                zone_id: zone.id,
                region: b.region,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> RenderedSize {
        RenderedSize::new(1000.0, 1000.0)
    }

    fn zones() -> Vec<Zone> {
        vec![
            Zone::new(1, Rect::new(0.1, 0.1, 0.3, 0.3)),
            Zone::new(2, Rect::new(0.3, 0.3, 0.3, 0.3)),
        ]
    }

    #[test]
    fn test_body_hit() {
        let hit = hit_test(&zones(), None, ScreenPoint::new(200.0, 200.0), size(), 6.0);
        assert_eq!(
            hit,
            Some(ZoneHit {
                zone_id: 1,
                region: HitRegion::Body
            })
        );
    }

    #[test]
    fn test_edge_hit_includes_outside_margin() {
        // 4px left of zone 1's left edge
        let hit = hit_test(&zones(), None, ScreenPoint::new(96.0, 200.0), size(), 6.0);
        assert_eq!(hit.map(|h| h.region), Some(HitRegion::Edge(Edge::Left)));
    }

    #[test]
    fn test_topmost_zone_wins() {
        // Inside both zones; zone 2 is drawn last
        let hit = hit_test(&zones(), None, ScreenPoint::new(350.0, 350.0), size(), 6.0);
        assert_eq!(hit.map(|h| h.zone_id), Some(2));
    }

    #[test]
    fn test_miss() {
        assert_eq!(
            hit_test(&zones(), None, ScreenPoint::new(900.0, 900.0), size(), 6.0),
            None
        );
    }

    #[test]
    fn test_override_geometry_is_used() {
        let moved = Zone::new(1, Rect::new(0.7, 0.7, 0.1, 0.1));
        let hit = hit_test(&zones(), Some(&moved), ScreenPoint::new(750.0, 750.0), size(), 6.0);
        assert_eq!(hit.map(|h| h.zone_id), Some(1));
        let stale = hit_test(&zones(), Some(&moved), ScreenPoint::new(150.0, 150.0), size(), 6.0);
        assert_eq!(stale, None);
    }

    #[test]
    fn test_bottom_handle() {
        let hit = hit_test(&zones(), None, ScreenPoint::new(500.0, 603.0), size(), 6.0);
        assert_eq!(
            hit,
            Some(ZoneHit {
                zone_id: 2,
                region: HitRegion::Edge(Edge::Bottom)
            })
        );
    }
}
