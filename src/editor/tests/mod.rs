//! Gesture scenarios driven through [`ZoneEditor::dispatch`].
//!
//! Each scenario feeds pointer and form events to an in-memory
//! [`FloorPlanSession`] and checks the committed zones and editor state.

mod create_tests;

use crate::editor::{EditorEvent, EditorHost, FloorPlanSession, ZoneEditor};
use crate::model::{Rect, ScreenPoint, Zone, ZoneId};
use crate::viewport::RenderedSize;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn editor(width: f64, height: f64) -> ZoneEditor<RenderedSize> {
    ZoneEditor::new(RenderedSize::new(width, height))
}

fn zone(id: ZoneId, left: f64, top: f64, width: f64, height: f64) -> Zone {
    Zone::new(id, Rect::new(left, top, width, height))
}

fn play(editor: &ZoneEditor<RenderedSize>, session: &mut FloorPlanSession, events: &[EditorEvent]) {
    for event in events {
        editor.dispatch(session, event);
    }
}

/// Draw a zone from `from` to `to`, closing any open details form first.
fn draw(
    editor: &ZoneEditor<RenderedSize>,
    session: &mut FloorPlanSession,
    from: ScreenPoint,
    to: ScreenPoint,
) {
    if session.editor_state().is_editing_zone() {
        editor.dispatch(session, &EditorEvent::Deselect);
    }
    play(
        editor,
        session,
        &[
            EditorEvent::down(from.x, from.y),
            EditorEvent::moved(to.x, to.y),
            EditorEvent::up(to.x, to.y),
        ],
    );
}
