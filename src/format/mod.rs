//! Floor-plan document import/export.
//!
//! A floor-plan document is a JSON file holding the base image reference and
//! the persisted zone list:
//!
//! ```json
//! { "version": "0.1.0", "image": "floor.png", "naturalWidth": 1000,
//!   "naturalHeight": 500,
//!   "zones": [ { "id": 1, "left": 0.1, "top": 0.2, "width": 0.3, "height": 0.2,
//!                "right": 0.4, "bottom": 0.4, "name": "Front", "zoneType": "entry" } ] }
//! ```

mod document;
mod error;

#[cfg(test)]
mod tests;

pub use document::{FloorPlanDocument, ImageSource, ZoneEntry};
pub use error::FormatError;
