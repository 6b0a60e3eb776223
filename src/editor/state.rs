//! Transient editor state.
//!
//! The state is owned by the host and handed back to the editor on every
//! event, so sibling views can share an in-progress edit. The current
//! gesture is a single tagged [`EditorMode`], which makes it impossible for
//! two gestures to be active at once.

use serde::{Deserialize, Serialize};

use crate::model::{Edge, NormPoint, Rect, ScreenPoint, Zone, ZoneId, ZoneType};

/// The gesture the editor is currently in, with its anchors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditorMode {
    /// Nothing selected, no gesture.
    #[default]
    Idle,
    /// Drawing a new zone.
    Creating {
        /// Pointer position where drawing started.
        start: ScreenPoint,
        /// The same position in normalized coordinates.
        anchor: NormPoint,
    },
    /// Moving the selected zone.
    Dragging {
        /// Pointer position where the drag started.
        start: ScreenPoint,
        /// Zone geometry before the drag.
        origin: Rect,
    },
    /// Moving one edge of the selected zone.
    Resizing {
        /// The edge being moved.
        direction: Edge,
        /// Pointer position where the resize started.
        start: ScreenPoint,
        /// Zone geometry before the resize.
        origin: Rect,
    },
    /// A zone is selected and its details are editable.
    Editing,
}

impl EditorMode {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            EditorMode::Idle => "idle",
            EditorMode::Creating { .. } => "creating",
            EditorMode::Dragging { .. } => "dragging",
            EditorMode::Resizing { .. } => "resizing",
            EditorMode::Editing => "editing",
        }
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            EditorMode::Creating { .. } | EditorMode::Dragging { .. } | EditorMode::Resizing { .. }
        )
    }
}

/// Interaction state of the zone editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// Current gesture.
    #[serde(default)]
    pub mode: EditorMode,
    /// Working copy of the zone being edited.
    #[serde(default)]
    pub selected_zone: Option<Zone>,
    /// Latest pointer position seen during a gesture.
    #[serde(default)]
    pub drag: Option<ScreenPoint>,
    /// Preview rectangle while creating.
    #[serde(default)]
    pub new_zone: Option<Rect>,
    /// Type shown in the details form.
    #[serde(default)]
    pub zone_type: Option<ZoneType>,
    /// Highest id handed out during this session.
    #[serde(default)]
    pub last_assigned_id: ZoneId,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh idle state that remembers the id high-water mark.
    pub fn reset(&self) -> Self {
        Self {
            last_assigned_id: self.last_assigned_id,
            ..Self::default()
        }
    }

    pub fn is_creating_zone(&self) -> bool {
        matches!(self.mode, EditorMode::Creating { .. })
    }

    pub fn is_dragging_zone(&self) -> bool {
        matches!(self.mode, EditorMode::Dragging { .. })
    }

    pub fn is_resizing_zone(&self) -> bool {
        matches!(self.mode, EditorMode::Resizing { .. })
    }

    pub fn is_editing_zone(&self) -> bool {
        matches!(self.mode, EditorMode::Editing)
    }

    /// Idle is the implicit state with no gesture and no selection.
    pub fn is_idle(&self) -> bool {
        matches!(self.mode, EditorMode::Idle) && self.selected_zone.is_none()
    }

    /// Edge being resized, if any.
    pub fn zone_resizing_direction(&self) -> Option<Edge> {
        match self.mode {
            EditorMode::Resizing { direction, .. } => Some(direction),
            _ => None,
        }
    }

    /// Id of the selected zone, if any.
    pub fn selected_id(&self) -> Option<ZoneId> {
        self.selected_zone.as_ref().map(|z| z.id)
    }
}
