//! Point-in-zone lookup for positions detected on the floor plan.
//!
//! Analytics consumers map every detected visitor position to the zone that
//! contains it. Positions arrive either normalized or in natural image
//! pixels; edges count as inside. When zones overlap the first one in list
//! order wins.

use std::collections::BTreeMap;

use crate::model::{NormPoint, Zone, ZoneId};
use crate::viewport::NaturalSize;

/// Zone containing a normalized point.
pub fn zone_at(zones: &[Zone], point: NormPoint) -> Option<&Zone> {
    zones.iter().find(|zone| zone.contains(point))
}

/// Zone containing a point given in natural image pixels.
pub fn zone_at_pixel(zones: &[Zone], natural: NaturalSize, x: f64, y: f64) -> Option<&Zone> {
    if natural.width == 0 || natural.height == 0 {
        return None;
    }
    let point = NormPoint::new(x / f64::from(natural.width), y / f64::from(natural.height));
    zone_at(zones, point)
}

/// Number of points falling in each zone.
///
/// Every zone appears in the result, with zero when no point landed in it.
/// Points outside all zones are counted under `None`.
pub fn count_by_zone<I>(zones: &[Zone], points: I) -> BTreeMap<Option<ZoneId>, usize>
where
    I: IntoIterator<Item = NormPoint>,
{
    let mut counts: BTreeMap<Option<ZoneId>, usize> =
        zones.iter().map(|zone| (Some(zone.id), 0)).collect();
    for point in points {
        *counts.entry(zone_at(zones, point).map(|z| z.id)).or_default() += 1;
    }
    log::debug!("Located points in {} zones", zones.len());
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn zones() -> Vec<Zone> {
        vec![
            Zone::new(1, Rect::new(0.0, 0.0, 0.5, 0.5)),
            Zone::new(2, Rect::new(0.4, 0.4, 0.4, 0.4)),
        ]
    }

    #[test]
    fn test_zone_at_inside_and_outside() {
        let zones = zones();
        assert_eq!(zone_at(&zones, NormPoint::new(0.1, 0.1)).map(|z| z.id), Some(1));
        assert_eq!(zone_at(&zones, NormPoint::new(0.7, 0.7)).map(|z| z.id), Some(2));
        assert_eq!(zone_at(&zones, NormPoint::new(0.9, 0.1)), None);
    }

    #[test]
    fn test_edges_are_inside() {
        let zones = zones();
        assert_eq!(zone_at(&zones, NormPoint::new(0.5, 0.0)).map(|z| z.id), Some(1));
    }

    #[test]
    fn test_overlap_prefers_list_order() {
        let zones = zones();
        assert_eq!(zone_at(&zones, NormPoint::new(0.45, 0.45)).map(|z| z.id), Some(1));
    }

    #[test]
    fn test_zone_at_pixel() {
        let zones = zones();
        let natural = NaturalSize::new(1000, 500);
        assert_eq!(
            zone_at_pixel(&zones, natural, 700.0, 350.0).map(|z| z.id),
            Some(2)
        );
        assert_eq!(zone_at_pixel(&zones, NaturalSize::new(0, 0), 1.0, 1.0), None);
    }

    #[test]
    fn test_count_by_zone() {
        let zones = zones();
        let points = [
            NormPoint::new(0.1, 0.1),
            NormPoint::new(0.2, 0.3),
            NormPoint::new(0.7, 0.7),
            NormPoint::new(0.95, 0.05),
        ];
        let counts = count_by_zone(&zones, points);
        assert_eq!(counts.get(&Some(1)), Some(&2));
        assert_eq!(counts.get(&Some(2)), Some(&1));
        assert_eq!(counts.get(&None), Some(&1));

        let empty = count_by_zone(&zones, Vec::<NormPoint>::new());
        assert_eq!(empty.get(&Some(2)), Some(&0));
        assert_eq!(empty.get(&None), None);
    }
}
