//! CrayonBox command line entry point.
//!
//! Replays a recorded session onto a coloring canvas, writes the result as
//! SVG and saves the canvas so the next run can resume it.

use clap::Parser;
use crayonbox_core::storage::AutoSaveManager;
use crayonbox_core::{
    CanvasConfig, ColoringCanvas, ConfigError, FileStorage, RenderOptions, Session, SessionScript,
    ShapeKey, StorageError, render_svg,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "crayonbox")]
#[command(about = "Replay a coloring session and export it as SVG")]
#[command(version)]
struct Args {
    /// Session script (JSON) to replay
    session: PathBuf,

    /// Shape to color, overriding the script's
    #[arg(long, value_parser = parse_shape)]
    shape: Option<ShapeKey>,

    /// Canvas config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the SVG
    #[arg(short, long, default_value = "canvas.svg")]
    out: PathBuf,

    /// Directory for the saved canvas (defaults to the platform data dir)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Start from the saved canvas instead of a blank page
    #[arg(long)]
    resume: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read session {path}: {source}")]
    SessionIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid session {path}: {source}")]
    SessionParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn parse_shape(id: &str) -> Result<ShapeKey, String> {
    ShapeKey::from_id(id).ok_or_else(|| {
        let known: Vec<&str> = ShapeKey::ALL.iter().map(|k| k.id()).collect();
        format!("unknown shape '{id}' (expected one of: {})", known.join(", "))
    })
}

fn load_script(path: &Path) -> Result<SessionScript, AppError> {
    let display = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|source| AppError::SessionIo {
        path: display.clone(),
        source,
    })?;
    SessionScript::from_json(&json)
        .map_err(|source| AppError::SessionParse { path: display, source })
}

/// What a run produced.
#[derive(Debug)]
struct Outcome {
    strokes: usize,
    changes: usize,
    saved: bool,
}

fn run(args: &Args) -> Result<Outcome, AppError> {
    let config = match &args.config {
        Some(path) => CanvasConfig::load(path)?,
        None => CanvasConfig::default(),
    };
    let mut script = load_script(&args.session)?;
    if args.shape.is_some() {
        script.shape = args.shape;
    }

    let storage = match &args.store {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Saving canvases under {}", storage.base_path().display());
    let mut autosave = AutoSaveManager::new(Arc::new(storage));
    autosave.set_interval(config.autosave_interval());

    let mut canvas = ColoringCanvas::new(&config);
    if args.resume {
        let saved = pollster::block_on(autosave.load());
        if !saved.is_empty() || saved.shape.is_some() {
            canvas.apply_saved(saved);
            // Only an explicitly requested, different shape starts a new page.
            if args.shape.is_none() || args.shape == canvas.shape() {
                script.shape = None;
            }
        }
    }

    let (_, changes) = Session::run(&mut canvas, &script, &config.default_brush());
    if changes > 0 {
        autosave.mark_dirty();
    }

    let options = RenderOptions {
        view_box: config.view_box,
        ..Default::default()
    };
    let svg = render_svg(&canvas, &options);
    std::fs::write(&args.out, svg).map_err(|source| AppError::Output {
        path: args.out.display().to_string(),
        source,
    })?;
    log::info!("Wrote {}", args.out.display());

    // Flush on exit rather than waiting out the interval.
    let saved = autosave.is_dirty();
    if saved {
        pollster::block_on(autosave.save(&canvas.saved_canvas()))?;
    }
    Ok(Outcome {
        strokes: canvas.strokes().len(),
        changes,
        saved,
    })
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting CrayonBox");

    let args = Args::parse();
    match run(&args) {
        Ok(outcome) => {
            log::info!(
                "{} strokes, {} changes, saved: {}",
                outcome.strokes,
                outcome.changes,
                outcome.saved
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("crayonbox: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crayonbox_core::storage::{SAVED_CANVAS_KEY, load_canvas};
    use tempfile::tempdir;

    const SESSION: &str = r##"{
        "shape": "circle",
        "brush": { "kind": "crayon", "color": "#7C4DFF", "size": 4 },
        "events": [
            { "type": "down", "position": { "x": 30, "y": 50 } },
            { "type": "move", "position": { "x": 60, "y": 50 } },
            { "type": "up", "position": { "x": 60, "y": 50 } }
        ]
    }"##;

    fn args_in(dir: &Path) -> Args {
        let session = dir.join("session.json");
        std::fs::write(&session, SESSION).unwrap();
        Args {
            session,
            shape: None,
            config: None,
            out: dir.join("out.svg"),
            store: Some(dir.join("store")),
            resume: false,
        }
    }

    #[test]
    fn test_run_writes_svg_and_saves() {
        let dir = tempdir().unwrap();
        let args = args_in(dir.path());

        let outcome = run(&args).unwrap();
        assert_eq!(outcome.strokes, 1);
        assert!(outcome.saved);

        let svg = std::fs::read_to_string(&args.out).unwrap();
        assert!(svg.contains(r##"stroke="#7C4DFF""##));
        assert!(dir.path().join("store").join(format!("{SAVED_CANVAS_KEY}.json")).exists());
    }

    #[test]
    fn test_resume_keeps_previous_strokes() {
        let dir = tempdir().unwrap();
        let mut args = args_in(dir.path());
        run(&args).unwrap();

        args.resume = true;
        let outcome = run(&args).unwrap();
        assert_eq!(outcome.strokes, 2);

        let storage = FileStorage::new(dir.path().join("store")).unwrap();
        let saved = pollster::block_on(load_canvas(&storage));
        assert_eq!(saved.shape, Some(ShapeKey::Circle));
        assert_eq!(saved.paths.len(), 2);
    }

    #[test]
    fn test_shape_override() {
        let dir = tempdir().unwrap();
        let mut args = args_in(dir.path());
        args.shape = Some(ShapeKey::House);
        run(&args).unwrap();

        let svg = std::fs::read_to_string(&args.out).unwrap();
        assert!(svg.contains(r#"<path id="svg-path-4""#));
    }

    #[test]
    fn test_config_brush_size_applies_to_scripts_without_brush() {
        let dir = tempdir().unwrap();
        let mut args = args_in(dir.path());
        let session = r#"{
            "events": [
                { "type": "down", "position": { "x": 20, "y": 20 } },
                { "type": "up", "position": { "x": 60, "y": 20 } }
            ]
        }"#;
        std::fs::write(&args.session, session).unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{ "brush_size": 12 }"#).unwrap();
        args.config = Some(config);

        run(&args).unwrap();
        let svg = std::fs::read_to_string(&args.out).unwrap();
        assert!(svg.contains(r#"stroke-width="12""#));
    }

    #[test]
    fn test_bad_session_reports_path() {
        let dir = tempdir().unwrap();
        let mut args = args_in(dir.path());
        std::fs::write(&args.session, "{ broken").unwrap();
        let err = run(&args).unwrap_err();
        assert!(matches!(err, AppError::SessionParse { .. }));

        args.session = dir.path().join("missing.json");
        assert!(matches!(run(&args), Err(AppError::SessionIo { .. })));
    }

    #[test]
    fn test_parse_shape() {
        assert_eq!(parse_shape("tree"), Ok(ShapeKey::Tree));
        assert!(parse_shape("dragon").unwrap_err().contains("square"));
    }
}
