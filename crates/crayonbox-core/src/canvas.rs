//! The coloring canvas: outline, strokes, fills, stickers and history.

use crate::brush::{BrushKind, BrushSettings, StrokeSynthesizer};
use crate::color::{Color, RainbowCycle};
use crate::config::CanvasConfig;
use crate::hit_test;
use crate::history::{History, Snapshot};
use crate::outline::{Outline, SegmentId, ShapeKey};
use crate::sticker::{Sticker, StickerId, StickerKind, StickerLayer};
use crate::stroke::{Stroke, StrokeCollection, StrokeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// What a pointer press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Draw,
    /// Tap a region to fill it.
    Fill,
    /// Place one sticker, then return to drawing.
    Sticker(StickerKind),
}

/// Result of a pointer press.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerAction {
    /// A stroke was started.
    Began,
    /// A region was filled.
    Filled(SegmentId),
    /// A sticker was placed.
    Placed(StickerId),
    /// Nothing happened (e.g. a fill tap outside every region).
    Ignored,
}

/// Everything undo/redo restores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub strokes: StrokeCollection,
    pub fills: HashMap<SegmentId, Color>,
    pub stickers: Vec<Sticker>,
}

impl Snapshot for CanvasSnapshot {
    fn is_blank(&self) -> bool {
        self.strokes.is_empty() && self.fills.is_empty() && self.stickers.is_empty()
    }
}

/// Persisted form of a canvas.
///
/// Strokes are stored as an ordered list; ids are reassigned on restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedCanvas {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKey>,
    #[serde(default)]
    pub paths: Vec<Stroke>,
    #[serde(default)]
    pub fills: HashMap<SegmentId, Color>,
    #[serde(default)]
    pub stickers: Vec<Sticker>,
}

impl SavedCanvas {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.fills.is_empty() && self.stickers.is_empty()
    }
}

/// A coloring page being worked on.
#[derive(Debug, Clone)]
pub struct ColoringCanvas {
    shape: Option<ShapeKey>,
    outline: Outline,
    strokes: StrokeCollection,
    fills: HashMap<SegmentId, Color>,
    stickers: StickerLayer,
    synthesizer: StrokeSynthesizer,
    history: History<CanvasSnapshot>,
    rainbow: RainbowCycle,
    mode: Mode,
    sticker_size: f64,
}

impl Default for ColoringCanvas {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl ColoringCanvas {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            shape: None,
            outline: Outline::new(),
            strokes: StrokeCollection::new(),
            fills: HashMap::new(),
            stickers: StickerLayer::new(),
            synthesizer: StrokeSynthesizer::new(config.min_sample_distance),
            history: History::new(config.max_undo_history),
            rainbow: RainbowCycle::new(config.rainbow_interval()),
            mode: Mode::Draw,
            sticker_size: config.sticker_size,
        }
    }

    /// Switch to a built-in shape, starting over.
    pub fn select_shape(&mut self, key: ShapeKey) {
        self.load_outline(key.svg());
        self.shape = Some(key);
        log::info!("Selected shape {}", key.id());
    }

    /// Replace the outline with custom SVG markup, starting over.
    pub fn load_outline(&mut self, svg: &str) {
        self.outline = Outline::load(svg);
        self.shape = None;
        self.reset();
    }

    fn reset(&mut self) {
        self.strokes.clear();
        self.fills.clear();
        self.stickers.clear();
        self.synthesizer.end();
        self.history.clear();
        self.mode = Mode::Draw;
    }

    pub fn shape(&self) -> Option<ShapeKey> {
        self.shape
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn strokes(&self) -> &StrokeCollection {
        &self.strokes
    }

    pub fn fills(&self) -> &HashMap<SegmentId, Color> {
        &self.fills
    }

    pub fn fill_of(&self, id: &str) -> Option<Color> {
        self.fills.get(id).copied()
    }

    pub fn stickers(&self) -> &StickerLayer {
        &self.stickers
    }

    pub fn history(&self) -> &History<CanvasSnapshot> {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.synthesizer.is_active() {
            self.synthesizer.end();
        }
        self.mode = mode;
    }

    /// Color the rainbow brush would paint with right now.
    pub fn rainbow_color(&self) -> Color {
        self.rainbow.current()
    }

    /// Advance the rainbow timer.
    pub fn tick(&mut self, elapsed: Duration) -> Color {
        self.rainbow.tick(elapsed)
    }

    /// Path of the stroke in progress, empty when idle.
    pub fn current_path(&self) -> &str {
        self.synthesizer.current_path()
    }

    pub fn is_drawing(&self) -> bool {
        self.synthesizer.is_active()
    }

    /// Brush of the stroke in progress.
    pub fn active_brush(&self) -> Option<&BrushSettings> {
        self.synthesizer.settings()
    }

    pub fn pointer_down(&mut self, point: Point, settings: &BrushSettings) -> PointerAction {
        match self.mode {
            Mode::Draw => {
                self.synthesizer.begin(point, settings);
                PointerAction::Began
            }
            Mode::Fill => {
                let color = self.paint_color(settings);
                match self.fill_at(point, color) {
                    Some(id) => PointerAction::Filled(id),
                    None => PointerAction::Ignored,
                }
            }
            Mode::Sticker(kind) => {
                let id = self.stickers.add(kind, point, self.sticker_size);
                self.mode = Mode::Draw;
                self.commit();
                PointerAction::Placed(id)
            }
        }
    }

    /// Feed a drag sample. Returns the updated preview path.
    pub fn pointer_move(&mut self, point: Point) -> &str {
        self.synthesizer.extend(point)
    }

    /// Finish the stroke in progress, committing it if it has any path.
    pub fn pointer_up(&mut self, point: Point) -> Option<StrokeId> {
        let settings = *self.synthesizer.settings()?;
        self.synthesizer.extend(point);
        let path = self.synthesizer.end();
        if path.is_empty() {
            return None;
        }

        let mut stroke = Stroke::new(path, &settings);
        stroke.color = self.paint_color(&settings);
        let id = self.strokes.push(stroke);
        log::debug!("Committed stroke {id} ({} total)", self.strokes.len());
        self.commit();
        Some(id)
    }

    /// Color a brush paints with; the rainbow brush follows the cycle.
    pub fn paint_color(&self, settings: &BrushSettings) -> Color {
        match settings.kind {
            BrushKind::Rainbow => self.rainbow.current(),
            _ => settings.color,
        }
    }

    /// Fill the region under `point`, returning the filled segment.
    pub fn fill_at(&mut self, point: Point, color: Color) -> Option<SegmentId> {
        let id = hit_test::locate(point, &self.outline)?.clone();
        self.fills.insert(id.clone(), color);
        self.commit();
        Some(id)
    }

    pub fn add_sticker(&mut self, kind: StickerKind, center: Point) -> StickerId {
        let id = self.stickers.add(kind, center, self.sticker_size);
        self.commit();
        id
    }

    pub fn remove_sticker(&mut self, id: StickerId) -> Option<Sticker> {
        let removed = self.stickers.remove(id)?;
        self.commit();
        Some(removed)
    }

    /// Returns false if no sticker has this id.
    pub fn move_sticker(&mut self, id: StickerId, center: Point) -> bool {
        let found = self.stickers.move_to(id, center);
        self.commit_if(found)
    }

    pub fn resize_sticker(&mut self, id: StickerId, size: f64) -> bool {
        let found = self.stickers.resize(id, size);
        self.commit_if(found)
    }

    pub fn rotate_sticker(&mut self, id: StickerId, rotation: f64) -> bool {
        let found = self.stickers.rotate(id, rotation);
        self.commit_if(found)
    }

    fn commit_if(&mut self, changed: bool) -> bool {
        if changed {
            self.commit();
        }
        changed
    }

    pub fn select_sticker(&mut self, id: StickerId) -> Option<&Sticker> {
        self.stickers.select(id)
    }

    pub fn clear_sticker_selection(&mut self) {
        self.stickers.clear_selection();
    }

    /// Record the live state in history.
    fn commit(&mut self) -> bool {
        self.history.record(self.snapshot())
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.apply(snapshot);
                log::debug!("Undo ({} states left)", self.history.len());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.apply(snapshot);
                log::debug!("Redo ({} states)", self.history.len());
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erase strokes, fills and stickers. Recorded, so it can be undone.
    pub fn clear(&mut self) {
        self.synthesizer.end();
        self.strokes.clear();
        self.fills.clear();
        self.stickers.clear();
        self.commit();
        log::info!("Canvas cleared");
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            strokes: self.strokes.clone(),
            fills: self.fills.clone(),
            stickers: self.stickers.to_vec(),
        }
    }

    /// Replace the live state with `snapshot` and record it.
    pub fn restore(&mut self, snapshot: CanvasSnapshot) {
        self.apply(snapshot);
        self.commit();
    }

    fn apply(&mut self, snapshot: CanvasSnapshot) {
        self.strokes = snapshot.strokes;
        self.fills = snapshot.fills;
        self.stickers.replace(snapshot.stickers);
    }

    pub fn saved_canvas(&self) -> SavedCanvas {
        SavedCanvas {
            shape: self.shape,
            paths: self.strokes.iter().map(|(_, s)| s.clone()).collect(),
            fills: self.fills.clone(),
            stickers: self.stickers.to_vec(),
        }
    }

    /// Load persisted state. History restarts from it.
    pub fn apply_saved(&mut self, saved: SavedCanvas) {
        if let Some(key) = saved.shape {
            if self.shape != Some(key) {
                self.select_shape(key);
            }
        }
        self.synthesizer.end();
        self.history.clear();
        self.apply(CanvasSnapshot {
            strokes: saved.paths.into_iter().collect(),
            fills: saved.fills,
            stickers: saved.stickers,
        });
        self.commit();
        log::info!("Restored {} saved strokes", self.strokes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RAINBOW;

    fn draw(canvas: &mut ColoringCanvas, from: (f64, f64), to: (f64, f64)) -> StrokeId {
        let settings = BrushSettings::default();
        canvas.pointer_down(Point::new(from.0, from.1), &settings);
        canvas.pointer_move(Point::new(to.0, to.1));
        canvas.pointer_up(Point::new(to.0, to.1)).unwrap()
    }

    fn square_canvas() -> ColoringCanvas {
        let mut canvas = ColoringCanvas::default();
        canvas.select_shape(ShapeKey::Square);
        canvas
    }

    #[test]
    fn test_draw_commits_stroke() {
        let mut canvas = square_canvas();
        let settings = BrushSettings::default();

        assert_eq!(canvas.pointer_down(Point::new(10.0, 10.0), &settings), PointerAction::Began);
        assert_eq!(canvas.pointer_move(Point::new(20.0, 20.0)), "M 10 10 L 20 20");
        assert_eq!(canvas.current_path(), "M 10 10 L 20 20");

        let id = canvas.pointer_up(Point::new(20.0, 20.0)).unwrap();
        assert_eq!(canvas.strokes().get(id).unwrap().path, "M 10 10 L 20 20");
        assert_eq!(canvas.current_path(), "");
        assert!(!canvas.is_drawing());
    }

    #[test]
    fn test_pointer_up_without_stroke() {
        let mut canvas = square_canvas();
        assert_eq!(canvas.pointer_up(Point::new(1.0, 1.0)), None);
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn test_first_commit_is_baseline() {
        let mut canvas = square_canvas();
        draw(&mut canvas, (10.0, 10.0), (20.0, 20.0));
        assert!(!canvas.undo());
        assert_eq!(canvas.strokes().len(), 1);
    }

    #[test]
    fn test_commit_undo_redo_restores_exactly() {
        let mut canvas = square_canvas();
        draw(&mut canvas, (10.0, 10.0), (20.0, 20.0));
        draw(&mut canvas, (30.0, 30.0), (40.0, 40.0));
        let after_commit = canvas.strokes().clone();

        assert!(canvas.undo());
        assert_eq!(canvas.strokes().len(), 1);
        assert!(canvas.redo());
        assert_eq!(canvas.strokes(), &after_commit);
        assert!(!canvas.redo());
    }

    #[test]
    fn test_fill_mode() {
        let mut canvas = square_canvas();
        canvas.set_mode(Mode::Fill);
        let settings = BrushSettings {
            color: Color::rgb(0xFF, 0x52, 0x52),
            ..Default::default()
        };

        let action = canvas.pointer_down(Point::new(50.0, 50.0), &settings);
        assert_eq!(action, PointerAction::Filled("svg-path-0".to_string()));
        assert_eq!(canvas.fill_of("svg-path-0"), Some(Color::rgb(0xFF, 0x52, 0x52)));

        assert_eq!(
            canvas.pointer_down(Point::new(200.0, 200.0), &settings),
            PointerAction::Ignored
        );
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn test_sticker_mode_places_once() {
        let mut canvas = square_canvas();
        canvas.set_mode(Mode::Sticker(StickerKind::Unicorn));

        let action = canvas.pointer_down(Point::new(40.0, 40.0), &BrushSettings::default());
        assert!(matches!(action, PointerAction::Placed(_)));
        assert_eq!(canvas.stickers().len(), 1);
        assert_eq!(canvas.mode(), Mode::Draw);
    }

    #[test]
    fn test_stickers_are_undoable() {
        let mut canvas = square_canvas();
        draw(&mut canvas, (10.0, 10.0), (20.0, 20.0));
        let id = canvas.add_sticker(StickerKind::Heart, Point::new(50.0, 50.0));
        assert!(canvas.move_sticker(id, Point::new(60.0, 60.0)));

        assert!(canvas.undo());
        assert_eq!(canvas.stickers().get(id).unwrap().center(), Point::new(50.0, 50.0));
        assert!(canvas.undo());
        assert!(canvas.stickers().is_empty());
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut canvas = square_canvas();
        draw(&mut canvas, (10.0, 10.0), (20.0, 20.0));
        canvas.fill_at(Point::new(50.0, 50.0), Color::white());

        canvas.clear();
        assert!(canvas.strokes().is_empty());
        assert!(canvas.fills().is_empty());

        assert!(canvas.undo());
        assert_eq!(canvas.strokes().len(), 1);
        assert_eq!(canvas.fills().len(), 1);
    }

    #[test]
    fn test_clear_on_fresh_canvas_records_nothing() {
        let mut canvas = square_canvas();
        canvas.clear();
        assert!(canvas.history().is_empty());
    }

    #[test]
    fn test_select_shape_resets() {
        let mut canvas = square_canvas();
        draw(&mut canvas, (10.0, 10.0), (20.0, 20.0));
        canvas.add_sticker(StickerKind::Star, Point::new(5.0, 5.0));

        canvas.select_shape(ShapeKey::House);
        assert_eq!(canvas.shape(), Some(ShapeKey::House));
        assert_eq!(canvas.outline().len(), 5);
        assert!(canvas.strokes().is_empty());
        assert!(canvas.stickers().is_empty());
        assert!(canvas.history().is_empty());
    }

    #[test]
    fn test_rainbow_brush_takes_cycle_color() {
        let mut canvas = square_canvas();
        canvas.tick(Duration::from_millis(1000));
        let settings = BrushSettings {
            kind: BrushKind::Rainbow,
            ..Default::default()
        };

        canvas.pointer_down(Point::new(10.0, 10.0), &settings);
        canvas.pointer_move(Point::new(20.0, 10.0));
        let id = canvas.pointer_up(Point::new(20.0, 10.0)).unwrap();

        assert_eq!(canvas.strokes().get(id).unwrap().color, RAINBOW[2]);
        assert_eq!(canvas.strokes().get(id).unwrap().path, "M 10 10 L 20 10");
    }

    #[test]
    fn test_saved_canvas_roundtrip() {
        let mut canvas = square_canvas();
        draw(&mut canvas, (10.0, 10.0), (20.0, 20.0));
        draw(&mut canvas, (30.0, 30.0), (40.0, 40.0));
        canvas.fill_at(Point::new(50.0, 50.0), Color::rgb(1, 2, 3));
        let saved = canvas.saved_canvas();

        let mut restored = ColoringCanvas::default();
        restored.apply_saved(saved.clone());

        assert_eq!(restored.shape(), Some(ShapeKey::Square));
        assert_eq!(restored.saved_canvas(), saved);
        assert!(!restored.can_undo());
    }
}
