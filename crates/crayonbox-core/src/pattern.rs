//! Stroke patterns offered by the pattern picker.

use serde::{Deserialize, Serialize};

/// Pattern applied along a stroke, either a dash array or a repeated stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokePattern {
    Dots,
    Dashes,
    #[serde(rename = "dashdot")]
    DashDot,
    Long,
    Heart,
    Star,
}

impl StrokePattern {
    pub const ALL: [StrokePattern; 6] = [
        StrokePattern::Dots,
        StrokePattern::Dashes,
        StrokePattern::DashDot,
        StrokePattern::Long,
        StrokePattern::Heart,
        StrokePattern::Star,
    ];

    /// Stable identifier, also used in saved canvases.
    pub fn id(&self) -> &'static str {
        match self {
            StrokePattern::Dots => "dots",
            StrokePattern::Dashes => "dashes",
            StrokePattern::DashDot => "dashdot",
            StrokePattern::Long => "long",
            StrokePattern::Heart => "heart",
            StrokePattern::Star => "star",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Display name for pickers.
    pub fn name(&self) -> &'static str {
        match self {
            StrokePattern::Dots => "Dots",
            StrokePattern::Dashes => "Dashes",
            StrokePattern::DashDot => "Dash-Dot",
            StrokePattern::Long => "Long Dash",
            StrokePattern::Heart => "Hearts",
            StrokePattern::Star => "Stars",
        }
    }

    /// SVG `stroke-dasharray` values for dash patterns.
    pub fn dash_array(&self) -> Option<&'static [f64]> {
        match self {
            StrokePattern::Dots => Some(&[1.0, 4.0]),
            StrokePattern::Dashes => Some(&[6.0, 4.0]),
            StrokePattern::DashDot => Some(&[6.0, 4.0, 1.0, 4.0]),
            StrokePattern::Long => Some(&[12.0, 6.0]),
            StrokePattern::Heart | StrokePattern::Star => None,
        }
    }

    /// Glyph stamped along the stroke for shape patterns.
    pub fn stamp(&self) -> Option<&'static str> {
        match self {
            StrokePattern::Heart => Some("❤️"),
            StrokePattern::Star => Some("⭐"),
            _ => None,
        }
    }

    /// Cycle to the next pattern.
    pub fn next(self) -> Self {
        match self {
            StrokePattern::Dots => StrokePattern::Dashes,
            StrokePattern::Dashes => StrokePattern::DashDot,
            StrokePattern::DashDot => StrokePattern::Long,
            StrokePattern::Long => StrokePattern::Heart,
            StrokePattern::Heart => StrokePattern::Star,
            StrokePattern::Star => StrokePattern::Dots,
        }
    }
}
