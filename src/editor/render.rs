//! Rendering contract.
//!
//! The editor draws nothing itself. [`build_view`] turns the zone list and
//! the editor state into plain descriptors a host renders however it likes:
//! one overlay per zone, the creation preview and the details popover.

use serde::Serialize;

use crate::model::{Rect, Zone, ZoneId, ZoneType};
use crate::viewport::RenderedSize;

use super::hit_test::{RegionBox, region_boxes};
use super::state::EditorState;

/// Rectangle in percent of the rendered image, for layout-independent placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentBox {
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            left: rect.left * 100.0,
            top: rect.top * 100.0,
            width: rect.width * 100.0,
            height: rect.height * 100.0,
        }
    }

    /// CSS-style placement, e.g. `left: 20.000%; top: 40.000%; ...`.
    pub fn to_css(&self) -> String {
        format!(
            "left: {:.3}%; top: {:.3}%; width: {:.3}%; height: {:.3}%",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Descriptor of one zone overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOverlay {
    pub zone_id: ZoneId,
    pub placement: PercentBox,
    pub selected: bool,
    pub labels: Vec<String>,
    /// Interactive regions in rendered pixels, empty until a size is known.
    pub regions: Vec<RegionBox>,
}

/// One choice of the type selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOption {
    pub value: ZoneType,
    pub label: &'static str,
    pub selected: bool,
}

/// Details form shown next to the selected zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popover {
    pub zone_id: ZoneId,
    pub title: String,
    /// Top-right corner of the zone in rendered pixels.
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub name: String,
    pub zone_type: Option<ZoneType>,
    pub options: Vec<TypeOption>,
}

impl Popover {
    fn for_zone(zone: &Zone, zone_type: Option<ZoneType>, size: RenderedSize) -> Self {
        Self {
            zone_id: zone.id,
            title: format!("Zone {} Details", zone.id),
            anchor_x: zone.right() * size.width,
            anchor_y: zone.bounds.top * size.height,
            name: zone.name.clone().unwrap_or_default(),
            zone_type,
            options: ZoneType::all()
                .iter()
                .map(|&value| TypeOption {
                    value,
                    label: value.label(),
                    selected: Some(value) == zone_type,
                })
                .collect(),
        }
    }
}

/// Everything a host needs to draw the editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub overlays: Vec<ZoneOverlay>,
    pub preview: Option<PercentBox>,
    pub popover: Option<Popover>,
}

/// Build the view for the current zones and state.
///
/// The selected zone is drawn from the state's working copy so drags and
/// resizes show live before they are committed. The popover needs a
/// rendered size to be anchored and is omitted without one.
pub fn build_view(
    zones: &[Zone],
    state: &EditorState,
    size: Option<RenderedSize>,
    handle_px: f64,
) -> EditorView {
    let selected_id = state.selected_id();
    let overlays = zones
        .iter()
        .map(|zone| {
            let zone = match &state.selected_zone {
                Some(selected) if selected.id == zone.id => selected,
                _ => zone,
            };
            ZoneOverlay {
                zone_id: zone.id,
                placement: PercentBox::from_rect(&zone.bounds),
                selected: selected_id == Some(zone.id),
                labels: zone.label_lines(),
                regions: size
                    .map(|s| region_boxes(&zone.bounds, s, handle_px).to_vec())
                    .unwrap_or_default(),
            }
        })
        .collect();

    let preview = if state.is_creating_zone() {
        state.new_zone.as_ref().map(PercentBox::from_rect)
    } else {
        None
    };

    let popover = match (&state.selected_zone, size) {
        (Some(zone), Some(size)) if state.is_editing_zone() => {
            Some(Popover::for_zone(zone, state.zone_type, size))
        }
        _ => None,
    };

    EditorView {
        overlays,
        preview,
        popover,
    }
}
