//! Global constants for the zone editor.
//!
//! Tolerances are expressed in rendered (on-screen) pixels and converted to
//! normalized image units through the current viewport size.

/// Minimum width/height of a zone, in rendered pixels.
pub const MIN_ZONE_SIZE_PX: f64 = 20.0;

/// Maximum edge distance at which an edge snaps to a candidate, in rendered pixels.
pub const SNAP_THRESHOLD_PX: f64 = 20.0;

/// Maximum perpendicular separation for two zones that do not overlap
/// to still be considered snap partners, in rendered pixels.
pub const SNAP_PERPENDICULAR_PX: f64 = 30.0;

/// Half-width of the grab area around each resize edge, in rendered pixels.
pub const HANDLE_HIT_PX: f64 = 6.0;

/// Default file name of the editor configuration.
pub const CONFIG_FILE_NAME: &str = "zone-editor.json";
