//! Interactive zone editing.
//!
//! [`ZoneEditor`] turns pointer and form events into create, move, resize,
//! rename, retype and delete operations on the host's zone list.

mod event;
mod hit_test;
mod host;
mod reducer;
mod render;
mod state;

#[cfg(test)]
mod tests;

pub use event::{EditorEvent, MouseButton};
pub use hit_test::{HitRegion, RegionBox, ZoneHit, hit_test, region_boxes};
pub use host::{EditorHost, FloorPlanSession};
pub use reducer::{Transition, ZoneEditor};
pub use render::{EditorView, PercentBox, Popover, TypeOption, ZoneOverlay, build_view};
pub use state::{EditorMode, EditorState};
