//! Editor state transitions.
//!
//! Every operation is a pure function of the current [`EditorState`], the
//! canonical zone list and one input. It returns a [`Transition`] holding the
//! next state and, when a zone edit is committed, the replacement zone list.
//! The host decides what to do with both; [`ZoneEditor::dispatch`] wires a
//! transition to the [`EditorHost`] callbacks.

use crate::config::GeometryConfig;
use crate::model::{Edge, NormPoint, Rect, ScreenPoint, Zone, ZoneId, ZoneType, next_zone_id};
use crate::snap::{find_snap_points, snap_edge, snap_free_edges, snap_translation};
use crate::viewport::{RenderedSize, Tolerances, ViewportProvider};

use super::event::{EditorEvent, MouseButton};
use super::hit_test::{HitRegion, ZoneHit, hit_test};
use super::host::EditorHost;
use super::state::{EditorMode, EditorState};

/// Outcome of one editor operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Next editor state.
    pub state: EditorState,
    /// Replacement zone list, present only when an edit was committed.
    pub zones: Option<Vec<Zone>>,
}

impl Transition {
    fn keep(state: &EditorState) -> Self {
        Self {
            state: state.clone(),
            zones: None,
        }
    }

    fn to(state: EditorState) -> Self {
        Self { state, zones: None }
    }

    fn commit(state: EditorState, zones: Vec<Zone>) -> Self {
        Self {
            state,
            zones: Some(zones),
        }
    }

    /// Whether this transition replaces the zone list.
    pub fn is_commit(&self) -> bool {
        self.zones.is_some()
    }
}

/// Geometry engine for one editor view.
///
/// Holds the pixel tolerances and the injected viewport; the zones and the
/// editor state always come from the host.
#[derive(Debug, Clone)]
pub struct ZoneEditor<V> {
    viewport: V,
    geometry: GeometryConfig,
}

impl<V: ViewportProvider> ZoneEditor<V> {
    /// Create an editor with default tolerances.
    pub fn new(viewport: V) -> Self {
        Self::with_config(viewport, GeometryConfig::default())
    }

    pub fn with_config(viewport: V, geometry: GeometryConfig) -> Self {
        Self { viewport, geometry }
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the viewport, e.g. to report a new layout size.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Current rendered size and the tolerances derived from it.
    fn measure(&self) -> Option<(RenderedSize, Tolerances)> {
        let size = self.viewport.rendered_size()?;
        Some((size, Tolerances::new(&self.geometry, size)))
    }

    // ------------------------------------------------------------------
    // Creating
    // ------------------------------------------------------------------

    /// Start drawing a new zone at `pos`.
    pub fn begin_create(&self, state: &EditorState, zones: &[Zone], pos: ScreenPoint) -> Transition {
        if state.mode.is_gesture() {
            return Transition::keep(state);
        }
        let Some((size, tol)) = self.measure() else {
            log::debug!("Ignoring create: image not laid out");
            return Transition::keep(state);
        };
        let anchor = size.to_normalized(pos);
        let preview = preview_rect(anchor, pos, pos, zones, size, &tol);
        log::debug!("✏️  Creating zone from ({:.1}, {:.1})", pos.x, pos.y);
        Transition::to(EditorState {
            mode: EditorMode::Creating { start: pos, anchor },
            selected_zone: None,
            drag: Some(pos),
            new_zone: Some(preview),
            zone_type: None,
            last_assigned_id: state.last_assigned_id,
        })
    }

    /// Update the creation preview for a pointer at `pos`.
    pub fn update_create(&self, state: &EditorState, zones: &[Zone], pos: ScreenPoint) -> Transition {
        let EditorMode::Creating { start, anchor } = state.mode else {
            return Transition::keep(state);
        };
        let Some((size, tol)) = self.measure() else {
            return Transition::keep(state);
        };
        let mut next = state.clone();
        next.drag = Some(pos);
        next.new_zone = Some(preview_rect(anchor, start, pos, zones, size, &tol));
        Transition::to(next)
    }

    /// Finish drawing: append the new zone and select it.
    pub fn commit_create(&self, state: &EditorState, zones: &[Zone], pos: ScreenPoint) -> Transition {
        let EditorMode::Creating { start, anchor } = state.mode else {
            return Transition::keep(state);
        };
        let bounds = match self.measure() {
            Some((size, tol)) => preview_rect(anchor, start, pos, zones, size, &tol),
            None => match state.new_zone {
                Some(preview) => preview,
                None => return Transition::keep(state),
            },
        };

        let Some(id) = next_zone_id(zones, state.last_assigned_id) else {
            log::warn!("Cannot create zone: zone ids are exhausted");
            return Transition::to(state.reset());
        };
        let zone = Zone::new(id, bounds);
        log::info!(
            "➕ Created zone {} at ({:.4}, {:.4}) size {:.4}x{:.4}",
            id,
            bounds.left,
            bounds.top,
            bounds.width,
            bounds.height
        );

        let mut updated = zones.to_vec();
        updated.push(zone.clone());
        Transition::commit(
            EditorState {
                mode: EditorMode::Editing,
                selected_zone: Some(zone),
                drag: None,
                new_zone: None,
                zone_type: None,
                last_assigned_id: id,
            },
            updated,
        )
    }

    // ------------------------------------------------------------------
    // Dragging and resizing
    // ------------------------------------------------------------------

    /// Start moving zone `zone_id`, selecting it.
    pub fn begin_drag(
        &self,
        state: &EditorState,
        zones: &[Zone],
        zone_id: ZoneId,
        pos: ScreenPoint,
    ) -> Transition {
        self.begin_edit(state, zones, zone_id, pos, None)
    }

    /// Start moving one edge of zone `zone_id`, selecting it.
    pub fn begin_resize(
        &self,
        state: &EditorState,
        zones: &[Zone],
        zone_id: ZoneId,
        edge: Edge,
        pos: ScreenPoint,
    ) -> Transition {
        self.begin_edit(state, zones, zone_id, pos, Some(edge))
    }

    fn begin_edit(
        &self,
        state: &EditorState,
        zones: &[Zone],
        zone_id: ZoneId,
        pos: ScreenPoint,
        edge: Option<Edge>,
    ) -> Transition {
        if state.mode.is_gesture() || self.measure().is_none() {
            return Transition::keep(state);
        }
        let Some(zone) = zones.iter().find(|z| z.id == zone_id) else {
            log::warn!("Cannot edit zone {}: not in the zone list", zone_id);
            return Transition::keep(state);
        };

        let origin = zone.bounds;
        let mode = match edge {
            Some(direction) => {
                log::debug!("↔️  Resizing zone {} by its {:?} edge", zone_id, direction);
                EditorMode::Resizing {
                    direction,
                    start: pos,
                    origin,
                }
            }
            None => {
                log::debug!("✋ Dragging zone {}", zone_id);
                EditorMode::Dragging { start: pos, origin }
            }
        };
        Transition::to(EditorState {
            mode,
            selected_zone: Some(zone.clone()),
            drag: Some(pos),
            new_zone: None,
            zone_type: zone.zone_type,
            last_assigned_id: state.last_assigned_id,
        })
    }

    /// Move the working copy of the dragged zone to follow the pointer.
    pub fn update_drag(&self, state: &EditorState, zones: &[Zone], pos: ScreenPoint) -> Transition {
        let EditorMode::Dragging { start, origin } = state.mode else {
            return Transition::keep(state);
        };
        let Some(id) = state.selected_id() else {
            return Transition::keep(state);
        };
        let Some((size, tol)) = self.measure() else {
            return Transition::keep(state);
        };

        let (dx, dy) = pointer_delta(size, start, pos);
        let moved = clamp_into_image(Rect::new(
            origin.left + dx,
            origin.top + dy,
            origin.width,
            origin.height,
        ));
        let snaps = find_snap_points(&moved, Some(id), zones, &tol);
        let bounds = clamp_into_image(snap_translation(moved, &snaps));

        Transition::to(with_selected_bounds(state, bounds, pos))
    }

    /// Move the resized edge of the working copy to follow the pointer.
    pub fn update_resize(&self, state: &EditorState, zones: &[Zone], pos: ScreenPoint) -> Transition {
        let EditorMode::Resizing {
            direction,
            start,
            origin,
        } = state.mode
        else {
            return Transition::keep(state);
        };
        let Some(id) = state.selected_id() else {
            return Transition::keep(state);
        };
        let Some((size, tol)) = self.measure() else {
            return Transition::keep(state);
        };

        let (dx, dy) = pointer_delta(size, start, pos);
        let resized = resize_edge(origin, direction, dx, dy, &tol);
        let snaps = find_snap_points(&resized, Some(id), zones, &tol);
        let bounds = snap_edge(resized, direction, &snaps, &tol);

        Transition::to(with_selected_bounds(state, bounds, pos))
    }

    /// Finish a drag: write the working copy back and open its details.
    pub fn commit_drag(&self, state: &EditorState, zones: &[Zone]) -> Transition {
        if !state.is_dragging_zone() {
            return Transition::keep(state);
        }
        finish_edit(state, zones)
    }

    /// Finish a resize: write the working copy back and open its details.
    pub fn commit_resize(&self, state: &EditorState, zones: &[Zone]) -> Transition {
        if !state.is_resizing_zone() {
            return Transition::keep(state);
        }
        finish_edit(state, zones)
    }

    // ------------------------------------------------------------------
    // Details form
    // ------------------------------------------------------------------

    /// Remove the selected zone from the list.
    pub fn delete_selected(&self, state: &EditorState, zones: &[Zone]) -> Transition {
        let Some(id) = state.selected_id() else {
            log::debug!("Delete ignored: no zone selected");
            return Transition::keep(state);
        };
        let updated: Vec<Zone> = zones.iter().filter(|z| z.id != id).cloned().collect();
        log::info!("🗑️  Deleted zone {}", id);
        Transition::commit(state.reset(), updated)
    }

    /// Set the name of the selected zone. An empty name clears it.
    pub fn rename_selected(&self, state: &EditorState, zones: &[Zone], name: &str) -> Transition {
        let name = (!name.is_empty()).then(|| name.to_string());
        let next = edit_selected(state, zones, |zone| zone.name = name.clone());
        if let Some(id) = state.selected_id() {
            log::debug!("Renamed zone {} to {:?}", id, name);
        }
        next
    }

    /// Set or clear the type of the selected zone.
    pub fn retype_selected(
        &self,
        state: &EditorState,
        zones: &[Zone],
        zone_type: Option<ZoneType>,
    ) -> Transition {
        let mut next = edit_selected(state, zones, |zone| zone.zone_type = zone_type);
        if state.selected_zone.is_some() {
            next.state.zone_type = zone_type;
            log::debug!(
                "Zone {:?} type set to {:?}",
                state.selected_id(),
                zone_type.map(|t| t.label())
            );
        }
        next
    }

    /// Change the type shown in the details form only.
    pub fn set_pending_type(&self, state: &EditorState, zone_type: Option<ZoneType>) -> Transition {
        let mut next = state.clone();
        next.zone_type = zone_type;
        Transition::to(next)
    }

    /// Close the details form and return to idle.
    ///
    /// If the working copy differs from the list entry it is written back
    /// first.
    pub fn deselect(&self, state: &EditorState, zones: &[Zone]) -> Transition {
        if !state.is_editing_zone() {
            return Transition::keep(state);
        }
        let next = state.reset();
        let modified = state.selected_zone.as_ref().and_then(|selected| {
            let index = zones.iter().position(|z| z.id == selected.id)?;
            (zones[index] != *selected).then_some((index, selected))
        });
        match modified {
            Some((index, selected)) => {
                let mut updated = zones.to_vec();
                updated[index] = selected.clone();
                Transition::commit(next, updated)
            }
            None => Transition::to(next),
        }
    }

    // ------------------------------------------------------------------
    // Event routing
    // ------------------------------------------------------------------

    /// Compute the transition for one input event.
    pub fn reduce(&self, state: &EditorState, zones: &[Zone], event: &EditorEvent) -> Transition {
        if event
            .position()
            .is_some_and(|pos| !pos.x.is_finite() || !pos.y.is_finite())
        {
            log::warn!("Ignoring pointer event with invalid position {:?}", event);
            return Transition::keep(state);
        }

        match event {
            EditorEvent::PointerDown {
                x,
                y,
                button,
                target,
            } => {
                if *button != MouseButton::Left {
                    return Transition::keep(state);
                }
                self.pointer_down(state, zones, ScreenPoint::new(*x, *y), *target)
            }
            EditorEvent::PointerMove { x, y } => {
                let pos = ScreenPoint::new(*x, *y);
                match state.mode {
                    EditorMode::Creating { .. } => self.update_create(state, zones, pos),
                    EditorMode::Dragging { .. } => self.update_drag(state, zones, pos),
                    EditorMode::Resizing { .. } => self.update_resize(state, zones, pos),
                    EditorMode::Idle | EditorMode::Editing => Transition::keep(state),
                }
            }
            EditorEvent::PointerUp { x, y } => match state.mode {
                EditorMode::Creating { .. } => {
                    self.commit_create(state, zones, ScreenPoint::new(*x, *y))
                }
                EditorMode::Dragging { .. } => self.commit_drag(state, zones),
                EditorMode::Resizing { .. } => self.commit_resize(state, zones),
                EditorMode::Editing => self.deselect(state, zones),
                EditorMode::Idle => Transition::keep(state),
            },
            EditorEvent::Rename { name } => self.rename_selected(state, zones, name),
            EditorEvent::Retype { zone_type } => self.retype_selected(state, zones, *zone_type),
            EditorEvent::SetPendingType { zone_type } => self.set_pending_type(state, *zone_type),
            EditorEvent::DeleteSelected => self.delete_selected(state, zones),
            EditorEvent::Deselect => self.deselect(state, zones),
        }
    }

    fn pointer_down(
        &self,
        state: &EditorState,
        zones: &[Zone],
        pos: ScreenPoint,
        target: Option<ZoneHit>,
    ) -> Transition {
        match state.mode {
            // A second press while drawing places the opposite corner
            EditorMode::Creating { .. } => return self.commit_create(state, zones, pos),
            // The release of the previous gesture was lost
            EditorMode::Dragging { .. } => return self.commit_drag(state, zones),
            EditorMode::Resizing { .. } => return self.commit_resize(state, zones),
            EditorMode::Idle | EditorMode::Editing => {}
        }

        let Some((size, _)) = self.measure() else {
            log::debug!("Ignoring pointer-down: image not laid out");
            return Transition::keep(state);
        };
        let hit = target.or_else(|| {
            hit_test(
                zones,
                state.selected_zone.as_ref(),
                pos,
                size,
                self.geometry.handle_hit_px,
            )
        });

        match hit {
            Some(ZoneHit {
                zone_id,
                region: HitRegion::Body,
            }) => self.begin_drag(state, zones, zone_id, pos),
            Some(ZoneHit {
                zone_id,
                region: HitRegion::Edge(edge),
            }) => self.begin_resize(state, zones, zone_id, edge, pos),
            None if state.is_editing_zone() => self.deselect(state, zones),
            None => self.begin_create(state, zones, pos),
        }
    }

    /// Apply one event to a host, invoking its callbacks.
    ///
    /// `update_zones` is called before `update_editor_state`, and only for
    /// committed edits. Returns whether either callback was invoked.
    pub fn dispatch<H>(&self, host: &mut H, event: &EditorEvent) -> bool
    where
        H: EditorHost + ?Sized,
    {
        let Transition { state, zones } = self.reduce(host.editor_state(), host.zones(), event);

        let previous_mode = host.editor_state().mode.name();
        let mut changed = false;
        if let Some(zones) = zones {
            host.update_zones(zones);
            changed = true;
        }
        if state != *host.editor_state() {
            if state.mode.name() != previous_mode {
                log::debug!("Editor mode: {} -> {}", previous_mode, state.mode.name());
            }
            host.update_editor_state(state);
            changed = true;
        }
        changed
    }
}

/// Write the working copy of the selected zone back into the list.
///
/// An edit that left the zone untouched only opens its details.
fn finish_edit(state: &EditorState, zones: &[Zone]) -> Transition {
    let Some(selected) = state.selected_zone.clone() else {
        return Transition::to(state.reset());
    };
    let Some(index) = zones.iter().position(|z| z.id == selected.id) else {
        log::warn!("Zone {} disappeared during the edit", selected.id);
        return Transition::to(state.reset());
    };
    let next = EditorState {
        mode: EditorMode::Editing,
        selected_zone: Some(selected.clone()),
        drag: None,
        new_zone: None,
        zone_type: state.zone_type,
        last_assigned_id: state.last_assigned_id,
    };
    if zones[index] == selected {
        log::debug!("Zone {} unchanged, opening its details", selected.id);
        return Transition::to(next);
    }

    log::info!(
        "Zone {} now at ({:.4}, {:.4}) size {:.4}x{:.4}",
        selected.id,
        selected.bounds.left,
        selected.bounds.top,
        selected.bounds.width,
        selected.bounds.height
    );
    let mut updated = zones.to_vec();
    updated[index] = selected;
    Transition::commit(next, updated)
}

/// Apply `edit` to the selected zone and to its list entry.
fn edit_selected(state: &EditorState, zones: &[Zone], edit: impl Fn(&mut Zone)) -> Transition {
    let Some(id) = state.selected_id() else {
        log::debug!("Edit ignored: no zone selected");
        return Transition::keep(state);
    };
    let mut next = state.clone();
    if let Some(selected) = next.selected_zone.as_mut() {
        edit(selected);
    }
    if !zones.iter().any(|z| z.id == id) {
        return Transition::to(next);
    }
    let updated = zones
        .iter()
        .map(|zone| {
            let mut zone = zone.clone();
            if zone.id == id {
                edit(&mut zone);
            }
            zone
        })
        .collect();
    Transition::commit(next, updated)
}

fn with_selected_bounds(state: &EditorState, bounds: Rect, pos: ScreenPoint) -> EditorState {
    let mut next = state.clone();
    if let Some(selected) = next.selected_zone.as_mut() {
        selected.bounds = bounds;
    }
    next.drag = Some(pos);
    next
}

fn pointer_delta(size: RenderedSize, start: ScreenPoint, pos: ScreenPoint) -> (f64, f64) {
    let (dx, dy) = pos.delta_from(start);
    size.delta_to_normalized(dx, dy)
}

fn clamp_point(point: NormPoint) -> NormPoint {
    NormPoint::new(point.x.clamp(0.0, 1.0), point.y.clamp(0.0, 1.0))
}

/// Shift `rect` so it lies inside the image, keeping its size.
fn clamp_into_image(rect: Rect) -> Rect {
    Rect::new(
        rect.left.min(1.0 - rect.width).max(0.0),
        rect.top.min(1.0 - rect.height).max(0.0),
        rect.width,
        rect.height,
    )
}

/// Grow `rect` to the minimum size, shifting it back inside the image if needed.
fn enforce_min_size(rect: Rect, tol: &Tolerances) -> Rect {
    let width = rect.width.max(tol.min_width).min(1.0);
    let height = rect.height.max(tol.min_height).min(1.0);
    clamp_into_image(Rect::new(rect.left, rect.top, width, height))
}

/// Rectangle spanned by the creation anchor and the current pointer,
/// sized and snapped.
fn preview_rect(
    anchor: NormPoint,
    start: ScreenPoint,
    pos: ScreenPoint,
    zones: &[Zone],
    size: RenderedSize,
    tol: &Tolerances,
) -> Rect {
    let (dx, dy) = pointer_delta(size, start, pos);
    let corner = NormPoint::new(anchor.x + dx, anchor.y + dy);
    let raw = Rect::from_corners(clamp_point(anchor), clamp_point(corner));
    let sized = enforce_min_size(raw, tol);
    let snaps = find_snap_points(&sized, None, zones, tol);
    snap_free_edges(sized, &snaps, tol)
}

/// Move one edge of `origin` by the pointer delta.
///
/// The displacement is limited so the opposite edge stays at least the
/// minimum size away and the moving edge stays inside the image.
fn resize_edge(origin: Rect, edge: Edge, dx: f64, dy: f64, tol: &Tolerances) -> Rect {
    match edge {
        Edge::Top => {
            let d = dy.min(origin.height - tol.min_height).max(-origin.top);
            Rect::from_edges(origin.left, origin.top + d, origin.right(), origin.bottom())
        }
        Edge::Bottom => {
            let d = dy
                .max(tol.min_height - origin.height)
                .min(1.0 - origin.bottom());
            Rect::new(origin.left, origin.top, origin.width, origin.height + d)
        }
        Edge::Left => {
            let d = dx.min(origin.width - tol.min_width).max(-origin.left);
            Rect::from_edges(origin.left + d, origin.top, origin.right(), origin.bottom())
        }
        Edge::Right => {
            let d = dx
                .max(tol.min_width - origin.width)
                .min(1.0 - origin.right());
            Rect::new(origin.left, origin.top, origin.width + d, origin.height)
        }
    }
}
