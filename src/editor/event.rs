//! Input events understood by the editor.
//!
//! Events are plain data so a host can forward them from any UI toolkit, and
//! so gesture scripts can be stored as JSON and replayed.

use serde::{Deserialize, Serialize};

use super::hit_test::ZoneHit;
use crate::model::{ScreenPoint, ZoneType};

/// Mouse button that produced a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// One editor input.
///
/// Pointer coordinates are pixels relative to the rendered image's top-left
/// corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    /// Primary interaction start on the canvas or on a zone overlay.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
        /// Overlay region that received the event. When absent the editor
        /// hit-tests the zone list itself.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ZoneHit>,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    /// Set the name of the selected zone.
    Rename { name: String },
    /// Set or clear the type of the selected zone.
    Retype {
        #[serde(rename = "zoneType", default)]
        zone_type: Option<ZoneType>,
    },
    /// Change the type shown in the details form without touching any zone.
    SetPendingType {
        #[serde(rename = "zoneType", default)]
        zone_type: Option<ZoneType>,
    },
    /// Remove the selected zone.
    DeleteSelected,
    /// Close the details form.
    Deselect,
}

impl EditorEvent {
    /// Left-button pointer-down that lets the editor hit-test.
    pub fn down(x: f64, y: f64) -> Self {
        EditorEvent::PointerDown {
            x,
            y,
            button: MouseButton::Left,
            target: None,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        EditorEvent::PointerMove { x, y }
    }

    pub fn up(x: f64, y: f64) -> Self {
        EditorEvent::PointerUp { x, y }
    }

    /// Pointer position carried by this event, if it is a pointer event.
    pub fn position(&self) -> Option<ScreenPoint> {
        match *self {
            EditorEvent::PointerDown { x, y, .. }
            | EditorEvent::PointerMove { x, y }
            | EditorEvent::PointerUp { x, y } => Some(ScreenPoint::new(x, y)),
            _ => None,
        }
    }
}
