//! Outline shapes: the static drawings children color in.
//!
//! Outlines come from a small SVG subset. Elements are found by pattern
//! matching over the markup rather than by a full XML parser, which is
//! enough for the built-in, trusted shape set.

mod library;

pub use library::ShapeKey;

use crate::path_data::lex_number;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::LazyLock;

/// Bézier control-point ratio for approximating a quarter circle.
pub const CIRCLE_KAPPA: f64 = 0.552284749831;

/// Identifier of an outline segment, `svg-path-{index}` in document order.
pub type SegmentId = String;

static ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(path|rect|circle|ellipse|polygon)\b[^>]*/?>").expect("element pattern is valid")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-\w:.]*)\s*=\s*"([^"]*)""#).expect("attribute pattern is valid")
});

/// SVG element an outline segment was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Path,
    Rect,
    Circle,
    Ellipse,
    Polygon,
}

impl ElementKind {
    /// Bounding-box slack used by the hit tester.
    pub fn hit_tolerance(&self) -> f64 {
        match self {
            ElementKind::Rect | ElementKind::Circle => 5.0,
            ElementKind::Path | ElementKind::Ellipse | ElementKind::Polygon => 10.0,
        }
    }
}

/// A drawable outline segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Path data.
    pub d: String,
    /// Stroke paint, as written in the source.
    pub stroke: String,
    pub stroke_width: f64,
    /// Fill paint, as written in the source.
    pub fill: String,
    pub kind: ElementKind,
}

/// An outline element, converted to path data when possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutlineEntry {
    Segment(PathSegment),
    /// Markup that could not be converted, kept for verbatim rendering.
    Opaque(String),
}

impl OutlineEntry {
    pub fn as_segment(&self) -> Option<&PathSegment> {
        match self {
            OutlineEntry::Segment(s) => Some(s),
            OutlineEntry::Opaque(_) => None,
        }
    }
}

/// Ordered mapping of segment ids to outline entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    entries: Vec<(SegmentId, OutlineEntry)>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an outline from SVG markup.
    ///
    /// Never fails: markup without recognizable shapes yields an empty
    /// outline, and malformed numbers turn into NaN coordinates.
    pub fn load(svg: &str) -> Self {
        let mut entries = Vec::new();

        for (index, element) in ELEMENT_RE.captures_iter(svg).enumerate() {
            let markup = &element[0];
            let tag = &element[1];
            let id = format!("svg-path-{index}");

            match convert_element(tag, markup) {
                Converted::Segment(segment) => entries.push((id, OutlineEntry::Segment(segment))),
                Converted::Opaque => entries.push((id, OutlineEntry::Opaque(markup.to_string()))),
                Converted::Skipped => {
                    log::warn!("Skipping <{tag}> with fewer than two points");
                }
            }
        }

        if entries.is_empty() {
            log::warn!("No shape elements found in outline source");
        } else {
            log::debug!("Loaded outline with {} entries", entries.len());
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&OutlineEntry> {
        self.entries.iter().find(|(eid, _)| eid == id).map(|(_, e)| e)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&SegmentId, &OutlineEntry)> {
        self.entries.iter().map(|(id, e)| (id, e))
    }

    /// Convertible segments in document order.
    pub fn segments(&self) -> impl Iterator<Item = (&SegmentId, &PathSegment)> {
        self.iter().filter_map(|(id, e)| e.as_segment().map(|s| (id, s)))
    }

    /// Every segment's path data joined into one clip path.
    pub fn clip_path(&self) -> String {
        self.segments()
            .map(|(_, s)| s.d.trim())
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

enum Converted {
    Segment(PathSegment),
    Opaque,
    Skipped,
}

/// Attribute lookup over one element's markup.
struct Attributes<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Attributes<'a> {
    fn parse(markup: &'a str) -> Self {
        let pairs = ATTR_RE
            .captures_iter(markup)
            .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
            .collect();
        Self { pairs }
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.get(name).map(parse_float)
    }

    fn number_or(&self, name: &str, default: f64) -> f64 {
        self.number(name).unwrap_or(default)
    }
}

/// Leading-number parse in the manner of JavaScript's `parseFloat`:
/// `"12px"` reads as 12, text with no leading number reads as NaN.
pub fn parse_float(text: &str) -> f64 {
    lex_number(text.trim_start()).map_or(f64::NAN, |(v, _)| v)
}

fn convert_element(tag: &str, markup: &str) -> Converted {
    let attrs = Attributes::parse(markup);
    let stroke = attrs.get("stroke").unwrap_or("black").to_string();
    let stroke_width = attrs.number("stroke-width").unwrap_or(2.0);
    let fill = attrs.get("fill").unwrap_or("none").to_string();

    let (d, kind) = match tag {
        "path" => match attrs.get("d") {
            Some(d) if !d.trim().is_empty() => (d.to_string(), ElementKind::Path),
            _ => return Converted::Opaque,
        },
        "polygon" => {
            let Some(points) = attrs.get("points") else {
                return Converted::Opaque;
            };
            match polygon_path(points) {
                Some(d) => (d, ElementKind::Polygon),
                None => return Converted::Skipped,
            }
        }
        "rect" => {
            let (Some(width), Some(height)) = (attrs.number("width"), attrs.number("height")) else {
                return Converted::Opaque;
            };
            let x = attrs.number_or("x", 0.0);
            let y = attrs.number_or("y", 0.0);
            (rect_path(x, y, width, height), ElementKind::Rect)
        }
        "circle" => {
            let Some(r) = attrs.number("r") else {
                return Converted::Opaque;
            };
            let cx = attrs.number_or("cx", 0.0);
            let cy = attrs.number_or("cy", 0.0);
            (ellipse_path(cx, cy, r, r), ElementKind::Circle)
        }
        "ellipse" => {
            let (Some(rx), Some(ry)) = (attrs.number("rx"), attrs.number("ry")) else {
                return Converted::Opaque;
            };
            let cx = attrs.number_or("cx", 0.0);
            let cy = attrs.number_or("cy", 0.0);
            (ellipse_path(cx, cy, rx, ry), ElementKind::Ellipse)
        }
        _ => return Converted::Opaque,
    };

    Converted::Segment(PathSegment {
        d,
        stroke,
        stroke_width,
        fill,
        kind,
    })
}

/// Closed rectangle path from its corner and size.
pub fn rect_path(x: f64, y: f64, width: f64, height: f64) -> String {
    let x2 = x + width;
    let y2 = y + height;
    format!("M{x},{y} L{x2},{y} L{x2},{y2} L{x},{y2} Z")
}

/// Four cubic Béziers approximating an axis-aligned ellipse, starting at the top.
pub fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    let kx = CIRCLE_KAPPA * rx;
    let ky = CIRCLE_KAPPA * ry;
    let mut d = String::new();
    // Writing into a String cannot fail.
    let _ = write!(d, "M{},{}", cx, cy - ry);
    let _ = write!(d, " C{},{} {},{} {},{}", cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
    let _ = write!(d, " C{},{} {},{} {},{}", cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
    let _ = write!(d, " C{},{} {},{} {},{}", cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
    let _ = write!(d, " C{},{} {},{} {},{}", cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
    d.push_str(" Z");
    d
}

/// Move-to plus line-tos through the polygon's points, back to the first.
/// Returns `None` for fewer than two points.
fn polygon_path(points: &str) -> Option<String> {
    let numbers: Vec<f64> = points
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(parse_float)
        .collect();
    let pairs: Vec<(f64, f64)> = numbers
        .chunks(2)
        .map(|c| (c[0], c.get(1).copied().unwrap_or(f64::NAN)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let mut d = String::new();
    for (i, (x, y)) in pairs.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(d, "{cmd}{x},{y}");
    }
    let (x0, y0) = pairs[0];
    let _ = write!(d, " L{x0},{y0}");
    Some(d)
}
