//! Built-in outline shapes.

use super::Outline;
use serde::{Deserialize, Serialize};

/// The fixed set of shapes a child can pick to color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKey {
    #[default]
    Square,
    Circle,
    Triangle,
    Star,
    Apple,
    Cat,
    Dog,
    Flower,
    Tree,
    House,
}

impl ShapeKey {
    pub const ALL: [ShapeKey; 10] = [
        ShapeKey::Square,
        ShapeKey::Circle,
        ShapeKey::Triangle,
        ShapeKey::Star,
        ShapeKey::Apple,
        ShapeKey::Cat,
        ShapeKey::Dog,
        ShapeKey::Flower,
        ShapeKey::Tree,
        ShapeKey::House,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ShapeKey::Square => "square",
            ShapeKey::Circle => "circle",
            ShapeKey::Triangle => "triangle",
            ShapeKey::Star => "star",
            ShapeKey::Apple => "apple",
            ShapeKey::Cat => "cat",
            ShapeKey::Dog => "dog",
            ShapeKey::Flower => "flower",
            ShapeKey::Tree => "tree",
            ShapeKey::House => "house",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// SVG source of the shape, drawn in a 100x100 view box.
    pub fn svg(&self) -> &'static str {
        match self {
            ShapeKey::Square => SQUARE,
            ShapeKey::Circle => CIRCLE,
            ShapeKey::Triangle => TRIANGLE,
            ShapeKey::Star => STAR,
            ShapeKey::Apple => APPLE,
            ShapeKey::Cat => CAT,
            ShapeKey::Dog => DOG,
            ShapeKey::Flower => FLOWER,
            ShapeKey::Tree => TREE,
            ShapeKey::House => HOUSE,
        }
    }

    pub fn outline(&self) -> Outline {
        Outline::load(self.svg())
    }
}

const SQUARE: &str = r#"<svg viewBox="0 0 100 100"><rect x="10" y="10" width="80" height="80" stroke="black" stroke-width="2" fill="none"/></svg>"#;

const CIRCLE: &str = r#"<svg viewBox="0 0 100 100"><circle cx="50" cy="50" r="40" stroke="black" stroke-width="2" fill="none"/></svg>"#;

const TRIANGLE: &str = r#"<svg viewBox="0 0 100 100"><polygon points="50,10 90,90 10,90" stroke="black" stroke-width="2" fill="none"/></svg>"#;

const STAR: &str = r#"<svg viewBox="0 0 100 100"><polygon points="50,10 61,35 90,35 65,55 75,80 50,65 25,80 35,55 10,35 39,35" stroke="black" stroke-width="2" fill="none"/></svg>"#;

const APPLE: &str = r#"<svg viewBox="0 0 100 100">
  <path d="M50,20 Q60,10 65,20 Q70,10 60,25 L60,25 Q75,25 80,40 Q85,60 70,80 Q60,90 50,80 Q40,90 30,80 Q15,60 20,40 Q25,25 40,25 L40,25 Q30,10 35,20 Q40,10 50,20 Z" stroke="black" stroke-width="2" fill="none"/>
  <path d="M50,20 L50,35" stroke="black" stroke-width="2" fill="none"/>
</svg>"#;

const CAT: &str = r#"<svg viewBox="0 0 100 100">
  <path d="M30,30 Q50,10 70,30 L70,70 Q50,90 30,70 Z" stroke="black" stroke-width="2" fill="none"/>
  <circle cx="40" cy="40" r="5" stroke="black" stroke-width="2" fill="none"/>
  <circle cx="60" cy="40" r="5" stroke="black" stroke-width="2" fill="none"/>
  <path d="M45,55 Q50,60 55,55" stroke="black" stroke-width="2" fill="none"/>
  <path d="M30,20 L20,10" stroke="black" stroke-width="2" fill="none"/>
  <path d="M70,20 L80,10" stroke="black" stroke-width="2" fill="none"/>
</svg>"#;

const DOG: &str = r#"<svg viewBox="0 0 100 100">
  <path d="M30,40 Q50,20 70,40 L70,70 Q50,90 30,70 Z" stroke="black" stroke-width="2" fill="none"/>
  <circle cx="40" cy="45" r="5" stroke="black" stroke-width="2" fill="none"/>
  <circle cx="60" cy="45" r="5" stroke="black" stroke-width="2" fill="none"/>
  <path d="M45,60 Q50,65 55,60" stroke="black" stroke-width="2" fill="none"/>
  <path d="M20,40 L30,40" stroke="black" stroke-width="2" fill="none"/>
  <path d="M20,30 Q30,20 40,30" stroke="black" stroke-width="2" fill="none"/>
  <path d="M60,30 Q70,20 80,30" stroke="black" stroke-width="2" fill="none"/>
</svg>"#;

const FLOWER: &str = r#"<svg viewBox="0 0 100 100">
  <circle cx="50" cy="50" r="15" stroke="black" stroke-width="2" fill="none"/>
  <ellipse cx="50" cy="20" rx="15" ry="10" stroke="black" stroke-width="2" fill="none"/>
  <ellipse cx="80" cy="50" rx="10" ry="15" stroke="black" stroke-width="2" fill="none"/>
  <ellipse cx="50" cy="80" rx="15" ry="10" stroke="black" stroke-width="2" fill="none"/>
  <ellipse cx="20" cy="50" rx="10" ry="15" stroke="black" stroke-width="2" fill="none"/>
  <path d="M50,85 L50,95" stroke="black" stroke-width="2" fill="none"/>
</svg>"#;

const TREE: &str = r#"<svg viewBox="0 0 100 100">
  <rect x="45" y="60" width="10" height="30" stroke="black" stroke-width="2" fill="none"/>
  <path d="M30,60 Q50,30 70,60 Z" stroke="black" stroke-width="2" fill="none"/>
  <path d="M35,45 Q50,20 65,45 Z" stroke="black" stroke-width="2" fill="none"/>
</svg>"#;

const HOUSE: &str = r#"<svg viewBox="0 0 100 100">
  <rect x="30" y="50" width="40" height="30" stroke="black" stroke-width="2" fill="none"/>
  <polygon points="30,50 50,30 70,50" stroke="black" stroke-width="2" fill="none"/>
  <rect x="45" y="60" width="10" height="20" stroke="black" stroke-width="2" fill="none"/>
  <rect x="35" y="55" width="10" height="10" stroke="black" stroke-width="2" fill="none"/>
  <rect x="55" y="55" width="10" height="10" stroke="black" stroke-width="2" fill="none"/>
</svg>"#;
