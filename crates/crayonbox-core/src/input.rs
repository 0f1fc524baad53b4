//! Serializable input events and session replay.

use crate::brush::{BrushKind, BrushSettings};
use crate::canvas::{ColoringCanvas, Mode, PointerAction};
use crate::color::Color;
use crate::outline::ShapeKey;
use crate::pattern::StrokePattern;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One user action against the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    SetBrush { brush: BrushKind },
    SetColor { color: Color },
    SetSize { size: f64 },
    SetPattern {
        #[serde(default)]
        pattern: Option<StrokePattern>,
    },
    SetMode { mode: Mode },
    SelectShape { shape: ShapeKey },
    Undo,
    Redo,
    Clear,
    /// Milliseconds elapsed, driving the rainbow cycle.
    Tick { ms: u64 },
}

/// A recorded session: the starting shape and brush plus the events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub shape: Option<ShapeKey>,
    /// Starting brush; without one the caller's default applies.
    #[serde(default)]
    pub brush: Option<BrushSettings>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl SessionScript {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Applies events to a canvas, holding the brush picked so far.
#[derive(Debug, Clone, Default)]
pub struct Session {
    brush: BrushSettings,
}

impl Session {
    pub fn new(brush: BrushSettings) -> Self {
        Self { brush }
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    /// Apply one event. Returns true if the canvas content changed.
    pub fn apply(&mut self, canvas: &mut ColoringCanvas, event: &InputEvent) -> bool {
        log::debug!("Applying {event:?}");
        match *event {
            InputEvent::Down { position } => matches!(
                canvas.pointer_down(position, &self.brush),
                PointerAction::Filled(_) | PointerAction::Placed(_)
            ),
            InputEvent::Move { position } => {
                canvas.pointer_move(position);
                false
            }
            InputEvent::Up { position } => canvas.pointer_up(position).is_some(),
            InputEvent::SetBrush { brush } => {
                self.brush.kind = brush;
                false
            }
            InputEvent::SetColor { color } => {
                self.brush.color = color;
                false
            }
            InputEvent::SetSize { size } => {
                self.brush.size = size;
                false
            }
            InputEvent::SetPattern { pattern } => {
                self.brush.pattern = pattern;
                false
            }
            InputEvent::SetMode { mode } => {
                canvas.set_mode(mode);
                false
            }
            InputEvent::SelectShape { shape } => {
                canvas.select_shape(shape);
                true
            }
            InputEvent::Undo => canvas.undo(),
            InputEvent::Redo => canvas.redo(),
            InputEvent::Clear => {
                canvas.clear();
                true
            }
            InputEvent::Tick { ms } => {
                canvas.tick(Duration::from_millis(ms));
                false
            }
        }
    }

    /// Apply every event in order. Returns how many changed the canvas.
    pub fn replay<'a>(
        &mut self,
        canvas: &mut ColoringCanvas,
        events: impl IntoIterator<Item = &'a InputEvent>,
    ) -> usize {
        events
            .into_iter()
            .filter(|event| self.apply(canvas, event))
            .count()
    }

    /// Set up the canvas from a script and replay it, starting with
    /// `default_brush` unless the script picks its own.
    pub fn run(
        canvas: &mut ColoringCanvas,
        script: &SessionScript,
        default_brush: &BrushSettings,
    ) -> (Self, usize) {
        if let Some(shape) = script.shape {
            canvas.select_shape(shape);
        }
        let mut session = Self::new(script.brush.unwrap_or(*default_brush));
        let changes = session.replay(canvas, &script.events);
        log::info!("Replayed {} events, {changes} changed the canvas", script.events.len());
        (session, changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::sticker::StickerKind;

    const SCRIPT: &str = r##"{
        "shape": "square",
        "events": [
            { "type": "set_color", "color": "#FF5252" },
            { "type": "set_brush", "brush": "pencil" },
            { "type": "down", "position": { "x": 20, "y": 20 } },
            { "type": "move", "position": { "x": 40, "y": 30 } },
            { "type": "up", "position": { "x": 40, "y": 30 } },
            { "type": "set_mode", "mode": "fill" },
            { "type": "down", "position": { "x": 50, "y": 50 } },
            { "type": "set_mode", "mode": { "sticker": "unicorn" } },
            { "type": "down", "position": { "x": 70, "y": 70 } },
            { "type": "undo" }
        ]
    }"##;

    #[test]
    fn test_parse_script() {
        let script = SessionScript::from_json(SCRIPT).unwrap();
        assert_eq!(script.shape, Some(ShapeKey::Square));
        assert_eq!(script.events.len(), 10);
        assert_eq!(
            script.events[7],
            InputEvent::SetMode {
                mode: Mode::Sticker(StickerKind::Unicorn)
            }
        );
        assert_eq!(script.events[9], InputEvent::Undo);
    }

    #[test]
    fn test_replay() {
        let script = SessionScript::from_json(SCRIPT).unwrap();
        let mut canvas = ColoringCanvas::default();
        let (session, changes) = Session::run(&mut canvas, &script, &BrushSettings::default());

        // stroke, fill, sticker, undo
        assert_eq!(changes, 4);
        assert_eq!(session.brush().kind, BrushKind::Pencil);
        assert_eq!(canvas.strokes().len(), 1);
        assert_eq!(canvas.fill_of("svg-path-0"), Some(Color::rgb(0xFF, 0x52, 0x52)));
        assert!(canvas.stickers().is_empty());
        assert_eq!(canvas.mode(), Mode::Draw);

        let stroke = canvas.strokes().iter().next().unwrap().1;
        assert_eq!(stroke.color, Color::rgb(0xFF, 0x52, 0x52));
        assert_eq!(stroke.brush, BrushKind::Pencil);
        assert!(stroke.path.starts_with("M 20 20 L "));
    }

    #[test]
    fn test_default_brush_applies_without_script_brush() {
        let defaults = CanvasConfig {
            brush_size: 12.0,
            ..Default::default()
        }
        .default_brush();
        let mut canvas = ColoringCanvas::default();

        let script = SessionScript::from_json(r#"{ "events": [] }"#).unwrap();
        let (session, _) = Session::run(&mut canvas, &script, &defaults);
        assert_eq!(session.brush().size, 12.0);

        let script = SessionScript::from_json(
            r##"{ "brush": { "kind": "chalk", "color": "#000000", "size": 3 }, "events": [] }"##,
        )
        .unwrap();
        let (session, _) = Session::run(&mut canvas, &script, &defaults);
        assert_eq!(session.brush().size, 3.0);
        assert_eq!(session.brush().kind, BrushKind::Chalk);
    }

    #[test]
    fn test_missed_fill_is_not_a_change() {
        let mut canvas = ColoringCanvas::default();
        canvas.select_shape(ShapeKey::Square);
        let mut session = Session::default();
        let events = [
            InputEvent::SetMode { mode: Mode::Fill },
            InputEvent::Down {
                position: Point::new(500.0, 500.0),
            },
            InputEvent::Tick { ms: 600 },
        ];
        assert_eq!(session.replay(&mut canvas, &events), 0);
    }
}
