//! SVG export of a canvas.

use crate::canvas::ColoringCanvas;
use crate::color::Color;
use crate::outline::{OutlineEntry, PathSegment};
use crate::path_data;
use crate::stroke::Stroke;
use kurbo::Point;
use std::fmt::Write as _;

const CLIP_ID: &str = "outline-clip";

/// Controls what [`render_svg`] draws.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Side of the square view box.
    pub view_box: f64,
    /// Painted behind everything; `None` leaves it transparent.
    pub background: Option<Color>,
    /// Clip strokes to the outline.
    pub clip_strokes: bool,
    /// Include the stroke still being drawn.
    pub include_preview: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            view_box: 100.0,
            background: Some(Color::white()),
            clip_strokes: true,
            include_preview: false,
        }
    }
}

/// Render the canvas as a standalone SVG document.
///
/// Layers, bottom to top: background, region fills, strokes, outline lines,
/// unconverted outline markup, stickers.
pub fn render_svg(canvas: &ColoringCanvas, options: &RenderOptions) -> String {
    let mut svg = String::new();
    let size = options.view_box;
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
    );

    let clip = canvas.outline().clip_path();
    let clipped = options.clip_strokes && !clip.is_empty();
    if clipped {
        let _ = writeln!(
            svg,
            r#"  <defs><clipPath id="{CLIP_ID}"><path d="{}"/></clipPath></defs>"#,
            escape_xml(&clip)
        );
    }

    if let Some(background) = options.background {
        let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{background}"/>"#);
    }

    for (id, segment) in canvas.outline().segments() {
        if let Some(color) = canvas.fill_of(id) {
            let _ = writeln!(
                svg,
                r#"  <path id="{}-fill" d="{}" fill="{color}" stroke="none"/>"#,
                escape_xml(id),
                escape_xml(&segment.d)
            );
        }
    }

    if clipped {
        let _ = writeln!(svg, r#"  <g clip-path="url(#{CLIP_ID})">"#);
    } else {
        svg.push_str("  <g>\n");
    }
    for (_, stroke) in canvas.strokes().iter() {
        write_stroke(&mut svg, stroke);
    }
    if options.include_preview {
        if let Some(settings) = canvas.active_brush() {
            let mut preview = Stroke::new(canvas.current_path().to_string(), settings);
            preview.color = canvas.paint_color(settings);
            write_stroke(&mut svg, &preview);
        }
    }
    svg.push_str("  </g>\n");

    for (id, entry) in canvas.outline().iter() {
        match entry {
            OutlineEntry::Segment(segment) => write_segment(&mut svg, id, segment),
            OutlineEntry::Opaque(markup) => {
                let _ = writeln!(svg, "  {markup}");
            }
        }
    }

    for sticker in canvas.stickers().iter() {
        let (x, y) = (sticker.x, sticker.y);
        let _ = write!(
            svg,
            r#"  <text x="{x}" y="{y}" font-size="{}" text-anchor="middle" dominant-baseline="central""#,
            sticker.size
        );
        if sticker.rotation != 0.0 {
            let _ = write!(svg, r#" transform="rotate({} {x} {y})""#, sticker.rotation);
        }
        let _ = writeln!(svg, ">{}</text>", escape_xml(sticker.glyph()));
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_stroke(svg: &mut String, stroke: &Stroke) {
    if stroke.path.is_empty() {
        return;
    }
    let params = stroke.brush.params();
    let width = stroke.width * params.width_scale;
    let _ = write!(
        svg,
        r#"    <path d="{}" fill="none" stroke="{}" stroke-width="{width}" stroke-linecap="round" stroke-linejoin="round""#,
        escape_xml(&stroke.path),
        stroke.color
    );
    if params.opacity < 1.0 {
        let _ = write!(svg, r#" stroke-opacity="{}""#, params.opacity);
    }
    if let Some(dashes) = stroke.pattern.and_then(|p| p.dash_array()) {
        let dashes: Vec<String> = dashes.iter().map(|d| (d * stroke.width).to_string()).collect();
        let _ = write!(svg, r#" stroke-dasharray="{}""#, dashes.join(","));
    }
    svg.push_str("/>\n");

    if let Some(stamp) = stroke.pattern.and_then(|p| p.stamp()) {
        for point in stamp_positions(&stroke.path, width * 3.0) {
            let _ = writeln!(
                svg,
                r#"    <text x="{}" y="{}" font-size="{width}" text-anchor="middle" dominant-baseline="central">{stamp}</text>"#,
                point.x, point.y
            );
        }
    }
}

/// Stroke vertices at least `spacing` apart, starting with the first.
fn stamp_positions(path: &str, spacing: f64) -> Vec<Point> {
    let mut positions: Vec<Point> = Vec::new();
    for point in path_data::vertices(path) {
        if !(point.x.is_finite() && point.y.is_finite()) {
            continue;
        }
        match positions.last() {
            Some(last) if last.distance(point) < spacing => {}
            _ => positions.push(point),
        }
    }
    positions
}

fn write_segment(svg: &mut String, id: &str, segment: &PathSegment) {
    let _ = writeln!(
        svg,
        r#"  <path id="{}" d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        escape_xml(id),
        escape_xml(&segment.d),
        escape_xml(&segment.stroke),
        segment.stroke_width
    );
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushKind, BrushSettings};
    use crate::canvas::Mode;
    use crate::outline::ShapeKey;
    use crate::pattern::StrokePattern;
    use crate::sticker::StickerKind;

    fn draw(canvas: &mut ColoringCanvas, settings: &BrushSettings) {
        canvas.pointer_down(Point::new(20.0, 20.0), settings);
        canvas.pointer_move(Point::new(60.0, 20.0));
        canvas.pointer_up(Point::new(60.0, 20.0));
    }

    #[test]
    fn test_empty_canvas() {
        let svg = render_svg(&ColoringCanvas::default(), &RenderOptions::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 100 100""#));
        assert!(!svg.contains("clipPath"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_strokes_are_clipped_and_styled() {
        let mut canvas = ColoringCanvas::default();
        canvas.select_shape(ShapeKey::Square);
        let settings = BrushSettings {
            kind: BrushKind::Watercolor,
            size: 10.0,
            ..Default::default()
        };
        draw(&mut canvas, &settings);

        let svg = render_svg(&canvas, &RenderOptions::default());
        assert!(svg.contains(
            r#"<clipPath id="outline-clip"><path d="M10,10 L90,10 L90,90 L10,90 Z"/>"#
        ));
        assert!(svg.contains(r#"<g clip-path="url(#outline-clip)">"#));
        assert!(svg.contains(r#"stroke-width="18""#));
        assert!(svg.contains(r#"stroke-opacity="0.3""#));
        assert!(svg.contains(r#"<path id="svg-path-0""#));
    }

    #[test]
    fn test_fills_and_dashes() {
        let mut canvas = ColoringCanvas::default();
        canvas.select_shape(ShapeKey::Square);
        canvas.set_mode(Mode::Fill);
        canvas.pointer_down(
            Point::new(50.0, 50.0),
            &BrushSettings {
                color: Color::rgb(0x44, 0x8A, 0xFF),
                ..Default::default()
            },
        );
        canvas.set_mode(Mode::Draw);
        draw(
            &mut canvas,
            &BrushSettings {
                size: 2.0,
                pattern: Some(StrokePattern::Dashes),
                ..Default::default()
            },
        );

        let svg = render_svg(&canvas, &RenderOptions::default());
        assert!(svg.contains(
            r##"<path id="svg-path-0-fill" d="M10,10 L90,10 L90,90 L10,90 Z" fill="#448AFF""##
        ));
        assert!(svg.contains(r#"stroke-dasharray="12,8""#));
    }

    #[test]
    fn test_stamp_pattern() {
        let mut canvas = ColoringCanvas::default();
        draw(
            &mut canvas,
            &BrushSettings {
                size: 5.0,
                pattern: Some(StrokePattern::Star),
                ..Default::default()
            },
        );
        let svg = render_svg(&canvas, &RenderOptions::default());
        assert_eq!(svg.matches("⭐").count(), 2);
    }

    #[test]
    fn test_stickers_and_escaping() {
        let mut canvas = ColoringCanvas::default();
        canvas.load_outline(r#"<rect x="0" y="0"/><path d="M0,0 L1,1" stroke="a&b"/>"#);
        let id = canvas.add_sticker(StickerKind::Bee, Point::new(30.0, 40.0));
        canvas.rotate_sticker(id, 15.0);

        let svg = render_svg(&canvas, &RenderOptions::default());
        assert!(svg.contains(r#"<rect x="0" y="0"/>"#));
        assert!(svg.contains(r#"stroke="a&amp;b""#));
        assert!(svg.contains(r#"transform="rotate(15 30 40)">🐝</text>"#));
    }

    #[test]
    fn test_preview() {
        let mut canvas = ColoringCanvas::default();
        canvas.pointer_down(Point::new(1.0, 1.0), &BrushSettings::default());
        canvas.pointer_move(Point::new(5.0, 5.0));

        let without = render_svg(&canvas, &RenderOptions::default());
        assert!(!without.contains("M 1 1 L 5 5"));

        let options = RenderOptions {
            include_preview: true,
            ..Default::default()
        };
        assert!(render_svg(&canvas, &options).contains(r#"d="M 1 1 L 5 5""#));
    }
}
