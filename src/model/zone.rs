//! Zone data model.

use serde::{Deserialize, Serialize};

use super::geometry::{NormPoint, Rect};

/// Unique identifier for a zone within one floor plan.
pub type ZoneId = u32;

/// Purpose tag attached to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    /// Store entrance and exit
    Entry,
    /// Checkout counters
    Checkout,
    /// Shelving area
    Shelving,
    /// Aisle between shelves (the stored tag keeps the historical spelling)
    Isle,
}

impl ZoneType {
    /// Get the display label for this zone type.
    pub fn label(&self) -> &'static str {
        match self {
            ZoneType::Entry => "Entry & Exit",
            ZoneType::Checkout => "Checkout",
            ZoneType::Shelving => "Shelving",
            ZoneType::Isle => "Isle",
        }
    }

    /// Get the stored tag for this zone type.
    pub fn tag(&self) -> &'static str {
        match self {
            ZoneType::Entry => "entry",
            ZoneType::Checkout => "checkout",
            ZoneType::Shelving => "shelving",
            ZoneType::Isle => "isle",
        }
    }

    /// Get all zone types in selector order.
    pub fn all() -> &'static [ZoneType] {
        &[
            ZoneType::Entry,
            ZoneType::Checkout,
            ZoneType::Shelving,
            ZoneType::Isle,
        ]
    }

    /// Look up a zone type by its stored tag.
    pub fn from_tag(tag: &str) -> Option<ZoneType> {
        Self::all().iter().copied().find(|t| t.tag() == tag)
    }
}

/// One of the four edges of a zone, used as the resize direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Left,
    Right,
    Bottom,
}

impl Edge {
    pub fn all() -> &'static [Edge] {
        &[Edge::Top, Edge::Left, Edge::Right, Edge::Bottom]
    }

    /// Whether this edge moves along the x axis.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// Position of this edge on `rect`, in normalized units.
    pub fn position(&self, rect: &Rect) -> f64 {
        match self {
            Edge::Top => rect.top,
            Edge::Left => rect.left,
            Edge::Right => rect.right(),
            Edge::Bottom => rect.bottom(),
        }
    }
}

/// A named rectangular region of the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Unique identifier, immutable once assigned.
    pub id: ZoneId,
    /// Geometry in normalized image coordinates.
    #[serde(flatten)]
    pub bounds: Rect,
    /// Optional user label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional purpose tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<ZoneType>,
}

impl Zone {
    /// Create an unnamed, untyped zone.
    pub fn new(id: ZoneId, bounds: Rect) -> Self {
        Self {
            id,
            bounds,
            name: None,
            zone_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, zone_type: ZoneType) -> Self {
        self.zone_type = Some(zone_type);
        self
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.bounds.right()
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bounds.bottom()
    }

    /// Whether a normalized point falls inside this zone, edges included.
    pub fn contains(&self, point: NormPoint) -> bool {
        self.bounds.contains(point)
    }

    /// Text lines shown inside the zone overlay.
    pub fn label_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("zone-{}", self.id)];
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            lines.push(name.to_string());
        }
        if let Some(zone_type) = self.zone_type {
            lines.push(zone_type.tag().to_string());
        }
        lines
    }
}

/// Compute the id for a newly created zone.
///
/// Ids are allocated as one past the largest id ever seen, taking both the
/// current list and the session's high-water mark into account, so an id is
/// never handed out twice within a session even after deletions. Returns
/// `None` once the id space is used up.
pub fn next_zone_id(zones: &[Zone], last_assigned: ZoneId) -> Option<ZoneId> {
    let largest = zones.iter().map(|z| z.id).max().unwrap_or(0);
    largest.max(last_assigned).checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: ZoneId) -> Zone {
        Zone::new(id, Rect::new(0.1, 0.1, 0.2, 0.2))
    }

    #[test]
    fn test_next_zone_id_empty() {
        assert_eq!(next_zone_id(&[], 0), Some(1));
    }

    #[test]
    fn test_next_zone_id_uses_max_not_gap() {
        let zones = vec![zone(1), zone(5), zone(3)];
        assert_eq!(next_zone_id(&zones, 0), Some(6));
    }

    #[test]
    fn test_next_zone_id_respects_high_water_mark() {
        // Zone 7 was created and deleted earlier in the session
        let zones = vec![zone(1), zone(2)];
        assert_eq!(next_zone_id(&zones, 7), Some(8));
    }

    #[test]
    fn test_next_zone_id_exhausted() {
        assert_eq!(next_zone_id(&[zone(ZoneId::MAX)], 0), None);
        assert_eq!(next_zone_id(&[zone(1)], ZoneId::MAX), None);
        assert_eq!(next_zone_id(&[zone(ZoneId::MAX - 1)], 0), Some(ZoneId::MAX));
    }

    #[test]
    fn test_zone_type_tags_roundtrip() {
        for t in ZoneType::all() {
            assert_eq!(ZoneType::from_tag(t.tag()), Some(*t));
        }
        assert_eq!(ZoneType::from_tag("aisle"), None);
    }

    #[test]
    fn test_zone_serializes_flat_camel_case() {
        let z = zone(3).with_type(ZoneType::Checkout).with_name("Tills");
        let json = serde_json::to_value(&z).expect("serialize zone");
        assert_eq!(json["id"], 3);
        assert_eq!(json["zoneType"], "checkout");
        assert_eq!(json["name"], "Tills");
        assert_eq!(json["left"], 0.1);
        assert!(json.get("bounds").is_none());
    }

    #[test]
    fn test_label_lines() {
        let z = zone(4).with_name("Front").with_type(ZoneType::Entry);
        assert_eq!(z.label_lines(), vec!["zone-4", "Front", "entry"]);
        assert_eq!(zone(2).label_lines(), vec!["zone-2"]);
    }

    #[test]
    fn test_edge_positions() {
        let r = Rect::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(Edge::Left.position(&r), 0.1);
        assert_eq!(Edge::Top.position(&r), 0.2);
        assert!((Edge::Right.position(&r) - 0.4).abs() < 1e-12);
        assert!((Edge::Bottom.position(&r) - 0.6).abs() < 1e-12);
        assert!(Edge::Left.is_vertical());
        assert!(!Edge::Bottom.is_vertical());
    }
}
