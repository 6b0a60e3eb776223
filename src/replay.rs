//! Gesture script replay.
//!
//! Loads a floor-plan document, feeds a JSON array of [`EditorEvent`]s
//! through a [`ZoneEditor`] and writes the resulting zones back. Used by the
//! `zone-replay` binary and handy for reproducing editor sessions in tests.

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::config::{ConfigError, EditorConfig};
use crate::editor::{EditorEvent, EditorHost, FloorPlanSession, ZoneEditor};
use crate::format::{FloorPlanDocument, FormatError};
use crate::viewport::RenderedSize;

/// Errors from a replay run.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Document could not be read or written
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Gesture script could not be read
    #[error("Failed to read gesture script {path:?}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Gesture script is not a valid event list
    #[error("Invalid gesture script: {0}")]
    ScriptFormat(#[from] serde_json::Error),
}

/// Command line of the `zone-replay` tool.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "zone-replay",
    version,
    about = "Replay a scripted gesture list against a floor-plan document"
)]
pub struct ReplayOptions {
    /// Floor-plan document to edit
    pub document: PathBuf,

    /// JSON array of editor events
    pub gestures: PathBuf,

    /// Rendered image size the gesture coordinates refer to, e.g. 500x250
    #[arg(long, value_name = "WxH", value_parser = parse_rendered)]
    pub rendered: Option<RenderedSize>,

    /// Write the result here instead of over the document
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Editor configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ReplayOptions {
    /// Where the result is written.
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.document)
    }
}

/// Parse a `WxH` size such as `500x250`.
pub fn parse_size(text: &str) -> Option<RenderedSize> {
    let (w, h) = text.split_once(['x', 'X'])?;
    let size = RenderedSize::new(w.trim().parse().ok()?, h.trim().parse().ok()?);
    size.is_usable().then_some(size)
}

fn parse_rendered(text: &str) -> Result<RenderedSize, String> {
    parse_size(text).ok_or_else(|| format!("invalid size '{}', expected WxH such as 500x250", text))
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    /// Events read from the script.
    pub events: usize,
    /// Zone list commits produced.
    pub commits: usize,
    /// Zones in the final document.
    pub zones: usize,
}

/// Apply `events` to the zones of `doc` at the given rendered size.
pub fn replay_events(
    doc: &mut FloorPlanDocument,
    events: &[EditorEvent],
    rendered: RenderedSize,
    config: &EditorConfig,
) -> ReplaySummary {
    let editor = ZoneEditor::with_config(rendered, config.geometry);
    let mut session = FloorPlanSession::new(doc.zones());

    for (index, event) in events.iter().enumerate() {
        let changed = editor.dispatch(&mut session, event);
        log::trace!("Event {}: {:?} (changed: {})", index, event, changed);
    }
    if !session.editor_state().is_idle() {
        log::warn!(
            "Script ended while {}; the open edit is discarded",
            session.editor_state().mode.name()
        );
    }

    let commits = session.commit_count();
    doc.set_zones(session.zones());
    ReplaySummary {
        events: events.len(),
        commits,
        zones: doc.zones.len(),
    }
}

/// Rendered size to replay at: explicit, or the natural size scaled to the
/// configured default width.
fn resolve_rendered_size(
    options: &ReplayOptions,
    doc: &mut FloorPlanDocument,
    config: &EditorConfig,
) -> Result<RenderedSize, FormatError> {
    if let Some(size) = options.rendered {
        return Ok(size);
    }
    let natural = match doc.image.natural_size() {
        Some(natural) => natural,
        None => {
            let base_dir = options.document.parent().unwrap_or(Path::new("."));
            doc.image.probe(base_dir)?
        }
    };
    Ok(RenderedSize::fit_width(
        natural,
        config.preferences.default_render_width,
    ))
}

/// Run a full replay as described by `options`.
pub fn replay(options: &ReplayOptions, config: &EditorConfig) -> Result<ReplaySummary, ReplayError> {
    let mut doc = FloorPlanDocument::load(&options.document)?;

    let script = std::fs::read_to_string(&options.gestures).map_err(|source| ReplayError::Script {
        path: options.gestures.clone(),
        source,
    })?;
    let events: Vec<EditorEvent> = serde_json::from_str(&script)?;

    let rendered = resolve_rendered_size(options, &mut doc, config)?;
    log::info!(
        "Replaying {} events at {}x{}",
        events.len(),
        rendered.width,
        rendered.height
    );

    let summary = replay_events(&mut doc, &events, rendered, config);
    doc.save(options.output_path())?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ImageSource;
    use crate::viewport::NaturalSize;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(list: &[&str]) -> Result<ReplayOptions, clap::Error> {
        ReplayOptions::try_parse_from(std::iter::once("zone-replay").chain(list.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        ReplayOptions::command().debug_assert();
    }

    #[test]
    fn test_parse_minimal() {
        let options = parse(&["plan.json", "moves.json"]).expect("parse args");
        assert_eq!(options.document, PathBuf::from("plan.json"));
        assert_eq!(options.gestures, PathBuf::from("moves.json"));
        assert_eq!(options.output_path(), Path::new("plan.json"));
        assert!(options.rendered.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let options = parse(&[
            "--rendered",
            "500x250",
            "plan.json",
            "moves.json",
            "--output",
            "out.json",
            "--config",
            "editor.json",
        ])
        .expect("parse args");
        assert_eq!(options.rendered, Some(RenderedSize::new(500.0, 250.0)));
        assert_eq!(options.output_path(), Path::new("out.json"));
        assert_eq!(options.config, Some(PathBuf::from("editor.json")));
    }

    #[test]
    fn test_parse_errors() {
        let kind = |list: &[&str]| parse(list).map(|_| ()).map_err(|e| e.kind());
        assert_eq!(kind(&["plan.json"]), Err(ErrorKind::MissingRequiredArgument));
        assert_eq!(
            kind(&["a", "b", "--rendered", "wide"]),
            Err(ErrorKind::ValueValidation)
        );
        assert_eq!(kind(&["a", "b", "--bogus"]), Err(ErrorKind::UnknownArgument));
        assert_eq!(kind(&["--help"]), Err(ErrorKind::DisplayHelp));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480"), Some(RenderedSize::new(640.0, 480.0)));
        assert_eq!(parse_size("0x480"), None);
        assert_eq!(parse_size("640"), None);
    }

    #[test]
    fn test_replay_events_creates_zone() {
        let mut doc = FloorPlanDocument::new(ImageSource::new("floor.png"));
        let events = vec![
            EditorEvent::down(100.0, 100.0),
            EditorEvent::up(200.0, 150.0),
            EditorEvent::Rename {
                name: "Entrance".to_string(),
            },
            EditorEvent::Deselect,
        ];
        let summary = replay_events(
            &mut doc,
            &events,
            RenderedSize::new(500.0, 250.0),
            &EditorConfig::default(),
        );
        assert_eq!(summary.events, 4);
        assert_eq!(summary.commits, 2);
        assert_eq!(summary.zones, 1);
        assert_eq!(doc.zones[0].name.as_deref(), Some("Entrance"));
        assert!((doc.zones[0].left - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_replay_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc_path = dir.path().join("plan.json");
        let script_path = dir.path().join("moves.json");
        let out_path = dir.path().join("out.json");

        FloorPlanDocument::new(
            ImageSource::new("floor.png").with_natural_size(NaturalSize::new(1000, 500)),
        )
        .save(&doc_path)
        .expect("save document");
        std::fs::write(
            &script_path,
            r#"[ { "type": "pointerDown", "x": 100, "y": 100 },
                 { "type": "pointerUp", "x": 200, "y": 150 },
                 { "type": "retype", "zoneType": "checkout" } ]"#,
        )
        .expect("write script");

        let options = ReplayOptions {
            document: doc_path.clone(),
            gestures: script_path,
            rendered: Some(RenderedSize::new(500.0, 250.0)),
            output: Some(out_path.clone()),
            config: None,
        };
        let summary = replay(&options, &EditorConfig::default()).expect("replay");
        assert_eq!(summary.zones, 1);

        let result = FloorPlanDocument::load(&out_path).expect("load result");
        assert_eq!(result.zones[0].zone_type, Some(crate::model::ZoneType::Checkout));
        // The input document is untouched
        let original = FloorPlanDocument::load(&doc_path).expect("load original");
        assert!(original.zones.is_empty());
    }

    #[test]
    fn test_default_render_width_from_natural_size() {
        let mut doc = FloorPlanDocument::new(
            ImageSource::new("floor.png").with_natural_size(NaturalSize::new(2000, 1000)),
        );
        let options = ReplayOptions {
            document: PathBuf::from("plan.json"),
            gestures: PathBuf::from("moves.json"),
            rendered: None,
            output: None,
            config: None,
        };
        let size = resolve_rendered_size(&options, &mut doc, &EditorConfig::default())
            .expect("rendered size");
        assert_eq!(size, RenderedSize::new(1000.0, 500.0));
    }

    #[test]
    fn test_invalid_script() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc_path = dir.path().join("plan.json");
        let script_path = dir.path().join("moves.json");
        FloorPlanDocument::new(ImageSource::new("floor.png"))
            .save(&doc_path)
            .expect("save document");
        std::fs::write(&script_path, r#"[ { "type": "teleport" } ]"#).expect("write script");

        let options = ReplayOptions {
            document: doc_path,
            gestures: script_path,
            rendered: Some(RenderedSize::new(100.0, 100.0)),
            output: None,
            config: None,
        };
        assert!(matches!(
            replay(&options, &EditorConfig::default()),
            Err(ReplayError::ScriptFormat(_))
        ));
    }
}
