//! CrayonBox Core Library
//!
//! Platform-agnostic logic for a children's coloring canvas: brush strokes,
//! outline shapes, tap-to-fill, stickers, undo/redo and persistence.

pub mod brush;
pub mod canvas;
pub mod color;
pub mod config;
pub mod history;
pub mod input;
pub mod outline;
pub mod path_data;
pub mod pattern;
pub mod render;
pub mod sticker;
pub mod storage;
pub mod stroke;

pub use brush::{BrushKind, BrushSettings, StrokeSynthesizer};
pub use canvas::{CanvasSnapshot, ColoringCanvas, Mode, PointerAction, SavedCanvas};
pub use color::{Color, RainbowCycle, PALETTE, RAINBOW};
pub use config::{CanvasConfig, ConfigError};
pub use history::{History, HistoryState, Snapshot};
pub use input::{InputEvent, Session, SessionScript};
pub use outline::{Outline, OutlineEntry, PathSegment, SegmentId, ShapeKey};
pub use pattern::StrokePattern;
pub use render::{RenderOptions, render_svg};
pub use sticker::{Sticker, StickerId, StickerKind, StickerLayer};
pub use storage::{FileStorage, MemoryStorage, SAVED_CANVAS_KEY, Storage, StorageError};
pub use stroke::{Stroke, StrokeCollection, StrokeId};
