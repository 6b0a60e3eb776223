//! Tests for drawing new zones.

use super::*;
use crate::config::GeometryConfig;
use crate::model::NormPoint;
use crate::viewport::NaturalSize;

#[test]
fn test_create_scenario_half_scale() {
    // 1000x500 image rendered at 500x250
    let natural = NaturalSize::new(1000, 500);
    let ed = editor(500.0, 250.0);
    let mut session = FloorPlanSession::new(Vec::new());

    play(
        &ed,
        &mut session,
        &[EditorEvent::down(100.0, 100.0), EditorEvent::up(200.0, 150.0)],
    );

    assert_eq!(session.zones().len(), 1);
    let created = &session.zones()[0];
    assert_eq!(created.id, 1);
    assert!(approx_eq(created.bounds.left, 0.2));
    assert!(approx_eq(created.bounds.top, 0.4));
    assert!(approx_eq(created.bounds.width, 0.2));
    assert!(approx_eq(created.bounds.height, 0.2));

    let (x, y, w, h) = natural.rect_to_pixels(&created.bounds);
    assert!(approx_eq(x, 200.0));
    assert!(approx_eq(y, 200.0));
    assert!(approx_eq(w, 200.0));
    assert!(approx_eq(h, 100.0));

    let state = session.editor_state();
    assert!(state.is_editing_zone());
    assert_eq!(state.selected_id(), Some(1));
    assert!(state.new_zone.is_none());
    assert_eq!(session.commit_count(), 1);
}

#[test]
fn test_zero_drag_gives_min_size() {
    let ed = editor(500.0, 250.0);
    let mut session = FloorPlanSession::new(Vec::new());
    play(
        &ed,
        &mut session,
        &[EditorEvent::down(100.0, 100.0), EditorEvent::up(100.0, 100.0)],
    );

    let created = &session.zones()[0];
    // 20px on a 500x250 render
    assert!(approx_eq(created.bounds.width, 0.04));
    assert!(approx_eq(created.bounds.height, 0.08));
    assert!(approx_eq(created.bounds.left, 0.2));
}

#[test]
fn test_backwards_drag_normalizes_corners() {
    let ed = editor(500.0, 250.0);
    let mut session = FloorPlanSession::new(Vec::new());
    draw(
        &ed,
        &mut session,
        ScreenPoint::new(200.0, 150.0),
        ScreenPoint::new(100.0, 100.0),
    );

    let created = &session.zones()[0];
    assert!(approx_eq(created.bounds.left, 0.2));
    assert!(approx_eq(created.bounds.top, 0.4));
    assert!(approx_eq(created.bounds.width, 0.2));
    assert!(approx_eq(created.bounds.height, 0.2));
}

#[test]
fn test_min_size_near_image_edge_stays_inside() {
    let ed = editor(500.0, 250.0);
    let mut session = FloorPlanSession::new(Vec::new());
    play(
        &ed,
        &mut session,
        &[EditorEvent::down(498.0, 249.0), EditorEvent::up(498.0, 249.0)],
    );

    let created = &session.zones()[0];
    assert!(created.right() <= 1.0 + EPSILON);
    assert!(created.bottom() <= 1.0 + EPSILON);
    assert!(approx_eq(created.bounds.width, 0.04));
}

#[test]
fn test_preview_follows_pointer() {
    let ed = editor(1000.0, 1000.0);
    let mut session = FloorPlanSession::new(Vec::new());
    play(
        &ed,
        &mut session,
        &[
            EditorEvent::down(100.0, 100.0),
            EditorEvent::moved(300.0, 250.0),
        ],
    );

    let state = session.editor_state();
    assert!(state.is_creating_zone());
    assert_eq!(state.drag, Some(ScreenPoint::new(300.0, 250.0)));
    let preview = state.new_zone.expect("preview");
    assert!(approx_eq(preview.width, 0.2));
    assert!(approx_eq(preview.height, 0.15));
    // Nothing committed while the gesture is open
    assert!(session.zones().is_empty());
    assert_eq!(session.commit_count(), 0);
}

#[test]
fn test_second_pointer_down_finishes_creation() {
    let ed = editor(1000.0, 1000.0);
    let mut session = FloorPlanSession::new(Vec::new());
    play(
        &ed,
        &mut session,
        &[
            EditorEvent::down(100.0, 100.0),
            EditorEvent::moved(150.0, 150.0),
            EditorEvent::down(200.0, 200.0),
        ],
    );

    assert_eq!(session.zones().len(), 1);
    assert!(approx_eq(session.zones()[0].bounds.width, 0.1));
    assert!(session.editor_state().is_editing_zone());
}

#[test]
fn test_new_zone_snaps_to_neighbour() {
    let ed = editor(1000.0, 1000.0);
    let neighbour = zone(1, 0.1, 0.3, 0.2, 0.2);
    let mut session = FloorPlanSession::new(vec![neighbour.clone()]);
    draw(
        &ed,
        &mut session,
        ScreenPoint::new(310.0, 350.0),
        ScreenPoint::new(450.0, 450.0),
    );

    let created = &session.zones()[1];
    assert_eq!(created.id, 2);
    assert_eq!(created.bounds.left, neighbour.right());
    // The opposite edge does not move
    assert!(approx_eq(created.right(), 0.45));
}

#[test]
fn test_created_zone_without_snapping_keeps_pixels() {
    let size = RenderedSize::new(500.0, 250.0);
    let ed = ZoneEditor::with_config(size, GeometryConfig::default().without_snapping());
    let mut session = FloorPlanSession::new(Vec::new());
    let from = ScreenPoint::new(123.0, 77.0);
    let to = ScreenPoint::new(311.0, 201.0);
    draw(&ed, &mut session, from, to);

    let bounds = session.zones()[0].bounds;
    let top_left = size.to_screen(NormPoint::new(bounds.left, bounds.top));
    let bottom_right = size.to_screen(NormPoint::new(bounds.right(), bounds.bottom()));
    assert!((top_left.x - from.x).abs() < 1.0);
    assert!((top_left.y - from.y).abs() < 1.0);
    assert!((bottom_right.x - to.x).abs() < 1.0);
    assert!((bottom_right.y - to.y).abs() < 1.0);
}

#[test]
fn test_pointer_down_on_canvas_while_editing_deselects() {
    let ed = editor(1000.0, 1000.0);
    let mut session = FloorPlanSession::new(Vec::new());
    draw(
        &ed,
        &mut session,
        ScreenPoint::new(100.0, 100.0),
        ScreenPoint::new(200.0, 200.0),
    );
    assert!(session.editor_state().is_editing_zone());

    play(
        &ed,
        &mut session,
        &[EditorEvent::down(800.0, 800.0), EditorEvent::up(800.0, 800.0)],
    );
    assert!(session.editor_state().is_idle());
    assert_eq!(session.zones().len(), 1);
}
