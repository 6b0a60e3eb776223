//! Data models for the zone editor.

mod geometry;
mod zone;

pub use geometry::{NormPoint, Rect, ScreenPoint};
pub use zone::{Edge, Zone, ZoneId, ZoneType, next_zone_id};
