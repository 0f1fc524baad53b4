//! Emoji stickers placed on top of the drawing.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default sticker size in canvas units.
pub const DEFAULT_STICKER_SIZE: f64 = 50.0;

/// Unique identifier for a placed sticker.
pub type StickerId = Uuid;

/// The sticker catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerKind {
    Heart,
    Star,
    Rainbow,
    Unicorn,
    Sparkles,
    Butterfly,
    Flower,
    Balloon,
    Sun,
    Moon,
    Cat,
    Dog,
    Bee,
    Ladybug,
}

impl StickerKind {
    pub const ALL: [StickerKind; 14] = [
        StickerKind::Heart,
        StickerKind::Star,
        StickerKind::Rainbow,
        StickerKind::Unicorn,
        StickerKind::Sparkles,
        StickerKind::Butterfly,
        StickerKind::Flower,
        StickerKind::Balloon,
        StickerKind::Sun,
        StickerKind::Moon,
        StickerKind::Cat,
        StickerKind::Dog,
        StickerKind::Bee,
        StickerKind::Ladybug,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            StickerKind::Heart => "heart",
            StickerKind::Star => "star",
            StickerKind::Rainbow => "rainbow",
            StickerKind::Unicorn => "unicorn",
            StickerKind::Sparkles => "sparkles",
            StickerKind::Butterfly => "butterfly",
            StickerKind::Flower => "flower",
            StickerKind::Balloon => "balloon",
            StickerKind::Sun => "sun",
            StickerKind::Moon => "moon",
            StickerKind::Cat => "cat",
            StickerKind::Dog => "dog",
            StickerKind::Bee => "bee",
            StickerKind::Ladybug => "ladybug",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Emoji drawn for this sticker.
    pub fn glyph(&self) -> &'static str {
        match self {
            StickerKind::Heart => "\u{2764}\u{FE0F}",
            StickerKind::Star => "\u{2B50}",
            StickerKind::Rainbow => "\u{1F308}",
            StickerKind::Unicorn => "\u{1F984}",
            StickerKind::Sparkles => "\u{2728}",
            StickerKind::Butterfly => "\u{1F98B}",
            StickerKind::Flower => "\u{1F338}",
            StickerKind::Balloon => "\u{1F388}",
            StickerKind::Sun => "\u{2600}\u{FE0F}",
            StickerKind::Moon => "\u{1F319}",
            StickerKind::Cat => "\u{1F431}",
            StickerKind::Dog => "\u{1F436}",
            StickerKind::Bee => "\u{1F41D}",
            StickerKind::Ladybug => "\u{1F41E}",
        }
    }
}

/// A sticker placed on the canvas, centered on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: StickerId,
    pub kind: StickerKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Sticker {
    pub fn new(kind: StickerKind, center: Point, size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x: center.x,
            y: center.y,
            size,
            rotation: 0.0,
        }
    }

    pub fn glyph(&self) -> &'static str {
        self.kind.glyph()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Square covering the glyph, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center(), (self.size, self.size))
    }
}

/// Stickers in placement order (back to front) plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct StickerLayer {
    stickers: Vec<Sticker>,
    selected: Option<StickerId>,
}

impl StickerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a sticker and return its id.
    pub fn add(&mut self, kind: StickerKind, center: Point, size: f64) -> StickerId {
        let sticker = Sticker::new(kind, center, size);
        let id = sticker.id;
        log::debug!("Placed {} sticker at ({}, {})", kind.id(), center.x, center.y);
        self.stickers.push(sticker);
        id
    }

    pub fn remove(&mut self, id: StickerId) -> Option<Sticker> {
        let index = self.stickers.iter().position(|s| s.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.stickers.remove(index))
    }

    /// Returns false if no sticker has this id.
    pub fn move_to(&mut self, id: StickerId, center: Point) -> bool {
        self.update(id, |s| {
            s.x = center.x;
            s.y = center.y;
        })
    }

    pub fn resize(&mut self, id: StickerId, size: f64) -> bool {
        self.update(id, |s| s.size = size)
    }

    pub fn rotate(&mut self, id: StickerId, rotation: f64) -> bool {
        self.update(id, |s| s.rotation = rotation)
    }

    fn update(&mut self, id: StickerId, f: impl FnOnce(&mut Sticker)) -> bool {
        match self.stickers.iter_mut().find(|s| s.id == id) {
            Some(sticker) => {
                f(sticker);
                true
            }
            None => false,
        }
    }

    /// Select a sticker for editing. Unknown ids clear the selection.
    pub fn select(&mut self, id: StickerId) -> Option<&Sticker> {
        self.selected = self.get(id).map(|s| s.id);
        self.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Sticker> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    /// Topmost sticker whose bounds contain `point`.
    pub fn sticker_at(&self, point: Point) -> Option<StickerId> {
        self.stickers
            .iter()
            .rev()
            .find(|s| s.bounds().contains(point))
            .map(|s| s.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sticker> {
        self.stickers.iter()
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    pub fn clear(&mut self) {
        self.stickers.clear();
        self.selected = None;
    }

    /// The placed stickers, for snapshotting.
    pub fn to_vec(&self) -> Vec<Sticker> {
        self.stickers.clone()
    }

    /// Replace every sticker, keeping the selection only if it survives.
    pub fn replace(&mut self, stickers: Vec<Sticker>) {
        self.stickers = stickers;
        if let Some(id) = self.selected {
            if self.get(id).is_none() {
                self.selected = None;
            }
        }
    }
}
