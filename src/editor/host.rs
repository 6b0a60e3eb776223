//! Host integration.
//!
//! The editor owns neither the zone list nor its own state. A host exposes
//! both through [`EditorHost`] and receives the replacements through its two
//! callbacks. [`FloorPlanSession`] is a ready-made in-memory host.

use crate::model::Zone;

use super::state::EditorState;

/// Owner of the canonical zone list and the editor state.
pub trait EditorHost {
    /// Canonical zone list.
    fn zones(&self) -> &[Zone];

    /// Current editor state.
    fn editor_state(&self) -> &EditorState;

    /// Receive the zone list after a committed edit.
    fn update_zones(&mut self, zones: Vec<Zone>);

    /// Receive the editor state after any interaction that changed it.
    fn update_editor_state(&mut self, state: EditorState);
}

/// In-memory host that tracks unsaved changes.
#[derive(Debug, Clone, Default)]
pub struct FloorPlanSession {
    zones: Vec<Zone>,
    state: EditorState,
    dirty: bool,
    commits: usize,
}

impl FloorPlanSession {
    /// Start a session on an existing zone list.
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            ..Default::default()
        }
    }

    /// Whether the zone list changed since the last [`Self::mark_saved`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Number of zone list commits received.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    pub fn into_zones(self) -> Vec<Zone> {
        self.zones
    }
}

impl EditorHost for FloorPlanSession {
    fn zones(&self) -> &[Zone] {
        &self.zones
    }

    fn editor_state(&self) -> &EditorState {
        &self.state
    }

    fn update_zones(&mut self, zones: Vec<Zone>) {
        log::trace!("Zone list updated: {} zones", zones.len());
        self.zones = zones;
        self.dirty = true;
        self.commits += 1;
    }

    fn update_editor_state(&mut self, state: EditorState) {
        self.state = state;
    }
}
