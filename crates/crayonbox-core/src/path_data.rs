//! SVG path-data parsing and vertex extraction.
//!
//! Parsing is forgiving: numbers that cannot be read become NaN and missing
//! arguments are padded with NaN, so malformed data degrades into geometry
//! that downstream checks reject rather than into an error.

use kurbo::{CubicBez, ParamCurve, Point, QuadBez};

/// Points sampled along each curve segment when flattening.
pub const CURVE_SAMPLES: usize = 8;

/// A path segment with every coordinate resolved to absolute space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    /// Elliptical arc, kept only by its end point.
    ArcTo(Point),
    ClosePath,
}

fn arity(command: char) -> usize {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'S' | 'Q' => 4,
        'C' => 6,
        'A' => 7,
        _ => 0,
    }
}

fn is_command(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'M' | 'L' | 'H' | 'V' | 'C' | 'S' | 'Q' | 'T' | 'A' | 'Z')
}

/// Read one number from the front of `s`, returning it and the bytes consumed.
pub(crate) fn lex_number(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return None;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    s[..i].parse().ok().map(|v| (v, i))
}

/// Split an argument list into numbers. Unreadable tokens become NaN.
fn lex_args(text: &str) -> Vec<f64> {
    let mut args = Vec::new();
    for token in text.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty()) {
        // Tokens like "1-2" or "1.5.5" hold several numbers.
        let mut rest = token;
        while !rest.is_empty() {
            match lex_number(rest) {
                Some((value, used)) => {
                    args.push(value);
                    rest = &rest[used..];
                }
                None => {
                    args.push(f64::NAN);
                    break;
                }
            }
        }
    }
    args
}

/// Parse path data into absolute segments.
pub fn parse(d: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = Point::ZERO;
    let mut subpath_start = Point::ZERO;
    // Control point reflected by S/T.
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    let mut chunks: Vec<(char, &str)> = Vec::new();
    let mut start: Option<(char, usize)> = None;
    for (idx, c) in d.char_indices() {
        if is_command(c) {
            if let Some((cmd, from)) = start {
                chunks.push((cmd, &d[from..idx]));
            }
            start = Some((c, idx + c.len_utf8()));
        }
    }
    if let Some((cmd, from)) = start {
        chunks.push((cmd, &d[from..]));
    }

    for (command, text) in chunks {
        let relative = command.is_ascii_lowercase();
        let upper = command.to_ascii_uppercase();
        let n = arity(command);

        if n == 0 {
            segments.push(Segment::ClosePath);
            current = subpath_start;
            last_cubic_ctrl = None;
            last_quad_ctrl = None;
            continue;
        }

        let args = lex_args(text);
        if args.is_empty() {
            continue;
        }

        for (group_index, group) in args.chunks(n).enumerate() {
            let arg = |i: usize| group.get(i).copied().unwrap_or(f64::NAN);
            let abs = |x: f64, y: f64, origin: Point| {
                if relative {
                    Point::new(origin.x + x, origin.y + y)
                } else {
                    Point::new(x, y)
                }
            };

            match upper {
                // Extra pairs after a move-to are implicit line-tos.
                'M' if group_index == 0 => {
                    current = abs(arg(0), arg(1), current);
                    subpath_start = current;
                    segments.push(Segment::MoveTo(current));
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                'M' | 'L' => {
                    current = abs(arg(0), arg(1), current);
                    segments.push(Segment::LineTo(current));
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                'H' => {
                    let x = if relative { current.x + arg(0) } else { arg(0) };
                    current = Point::new(x, current.y);
                    segments.push(Segment::LineTo(current));
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                'V' => {
                    let y = if relative { current.y + arg(0) } else { arg(0) };
                    current = Point::new(current.x, y);
                    segments.push(Segment::LineTo(current));
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                'C' => {
                    let c1 = abs(arg(0), arg(1), current);
                    let c2 = abs(arg(2), arg(3), current);
                    let to = abs(arg(4), arg(5), current);
                    segments.push(Segment::CurveTo(c1, c2, to));
                    last_cubic_ctrl = Some(c2);
                    last_quad_ctrl = None;
                    current = to;
                }
                'S' => {
                    let c1 = last_cubic_ctrl.map_or(current, |c| current + (current - c));
                    let c2 = abs(arg(0), arg(1), current);
                    let to = abs(arg(2), arg(3), current);
                    segments.push(Segment::CurveTo(c1, c2, to));
                    last_cubic_ctrl = Some(c2);
                    last_quad_ctrl = None;
                    current = to;
                }
                'Q' => {
                    let c = abs(arg(0), arg(1), current);
                    let to = abs(arg(2), arg(3), current);
                    segments.push(Segment::QuadTo(c, to));
                    last_quad_ctrl = Some(c);
                    last_cubic_ctrl = None;
                    current = to;
                }
                'T' => {
                    let c = last_quad_ctrl.map_or(current, |q| current + (current - q));
                    let to = abs(arg(0), arg(1), current);
                    segments.push(Segment::QuadTo(c, to));
                    last_quad_ctrl = Some(c);
                    last_cubic_ctrl = None;
                    current = to;
                }
                'A' => {
                    let to = abs(arg(5), arg(6), current);
                    segments.push(Segment::ArcTo(to));
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                    current = to;
                }
                _ => {}
            }
        }
    }

    segments
}

/// Ordered outline vertices of a path, with curves flattened.
///
/// A close re-emits the start of the current subpath so the polygon closes.
pub fn vertices(d: &str) -> Vec<Point> {
    let mut points = Vec::new();
    let mut current = Point::ZERO;
    let mut subpath_start = Point::ZERO;

    for segment in parse(d) {
        match segment {
            Segment::MoveTo(p) => {
                points.push(p);
                current = p;
                subpath_start = p;
            }
            Segment::LineTo(p) | Segment::ArcTo(p) => {
                points.push(p);
                current = p;
            }
            Segment::QuadTo(c, p) => {
                let quad = QuadBez::new(current, c, p);
                points.extend(
                    (1..=CURVE_SAMPLES).map(|i| quad.eval(i as f64 / CURVE_SAMPLES as f64)),
                );
                current = p;
            }
            Segment::CurveTo(c1, c2, p) => {
                let cubic = CubicBez::new(current, c1, c2, p);
                points.extend(
                    (1..=CURVE_SAMPLES).map(|i| cubic.eval(i as f64 / CURVE_SAMPLES as f64)),
                );
                current = p;
            }
            Segment::ClosePath => {
                if !points.is_empty() {
                    points.push(subpath_start);
                }
                current = subpath_start;
            }
        }
    }

    points
}
