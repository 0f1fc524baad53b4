//! Committed strokes and their ordered collection.

use crate::brush::{BrushKind, BrushSettings};
use crate::color::Color;
use crate::pattern::StrokePattern;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a committed stroke.
pub type StrokeId = Uuid;

/// One finished freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// SVG path data.
    pub path: String,
    pub color: Color,
    pub width: f64,
    #[serde(default)]
    pub brush: BrushKind,
    #[serde(rename = "patternId", default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<StrokePattern>,
}

impl Stroke {
    /// Build a stroke from finished path data and the brush it was drawn with.
    pub fn new(path: String, settings: &BrushSettings) -> Self {
        Self {
            path,
            color: settings.color,
            width: settings.size,
            brush: settings.kind,
            pattern: settings.pattern,
        }
    }
}

/// Strokes keyed by id, plus their paint order (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeCollection {
    strokes: HashMap<StrokeId, Stroke>,
    order: Vec<StrokeId>,
}

impl StrokeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke on top and return its new id.
    pub fn push(&mut self, stroke: Stroke) -> StrokeId {
        let id = Uuid::new_v4();
        self.order.push(id);
        self.strokes.insert(id, stroke);
        id
    }

    pub fn remove(&mut self, id: StrokeId) -> Option<Stroke> {
        self.order.retain(|&stroke_id| stroke_id != id);
        self.strokes.remove(&id)
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(&id)
    }

    /// Strokes in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (StrokeId, &Stroke)> {
        self.order
            .iter()
            .filter_map(|id| self.strokes.get(id).map(|stroke| (*id, stroke)))
    }

    pub fn ids(&self) -> &[StrokeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.order.clear();
    }
}

impl FromIterator<Stroke> for StrokeCollection {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        let mut collection = Self::new();
        for stroke in iter {
            collection.push(stroke);
        }
        collection
    }
}
