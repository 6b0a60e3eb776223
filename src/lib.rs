//! Zone Editor - floor-plan zone geometry engine
//!
//! An event-driven editor for axis-aligned rectangular zones drawn over a
//! store floor-plan image. Zones live in normalized image coordinates; the
//! editor turns pointer input into create, move, resize and delete
//! operations with magnetic edge snapping, and hands every change back to
//! its host.
//!
//! ```rust,ignore
//! use zone_editor::editor::{EditorEvent, FloorPlanSession, ZoneEditor};
//! use zone_editor::viewport::RenderedSize;
//!
//! let editor = ZoneEditor::new(RenderedSize::new(500.0, 250.0));
//! let mut session = FloorPlanSession::new(Vec::new());
//! editor.dispatch(&mut session, &EditorEvent::down(100.0, 100.0));
//! editor.dispatch(&mut session, &EditorEvent::up(200.0, 150.0));
//! ```

pub mod config;
pub mod constants;
pub mod editor;
pub mod format;
pub mod locate;
pub mod model;
pub mod replay;
pub mod snap;
pub mod viewport;

pub use config::{EditorConfig, GeometryConfig, LogLevel};
pub use editor::{EditorEvent, EditorHost, EditorState, FloorPlanSession, ZoneEditor};
pub use format::{FloorPlanDocument, FormatError, ImageSource};
pub use model::{Edge, NormPoint, Rect, ScreenPoint, Zone, ZoneId, ZoneType};
pub use viewport::{NaturalSize, RenderedSize, ViewportProvider};
