//! Brush kinds and the stroke synthesizer.
//!
//! The synthesizer turns a stream of pointer samples into SVG path data.
//! Every brush shares the same sample handling (distance threshold, timing,
//! interpolation) and differs only in the [`Texture`] it lays along each
//! accepted segment.

use crate::color::Color;
use crate::pattern::StrokePattern;
use kurbo::{Point, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Instant;

/// Samples closer than this to the last accepted sample are dropped.
pub const DEFAULT_MIN_SAMPLE_DISTANCE: f64 = 0.5;

/// Upper bound on interpolation steps per accepted sample.
pub const MAX_STEPS: usize = 6;

/// Default brush size in canvas units.
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;

/// Available brush kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    #[default]
    #[serde(rename = "brush")]
    Plain,
    Pencil,
    Chalk,
    Watercolor,
    Crayon,
    Roller,
    Rainbow,
    Highlighter,
}

/// How a brush decorates the straight segment between two samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Texture {
    /// A single line-to the new sample.
    Line,
    /// `per_step` randomly offset points per interpolation step.
    Jitter { per_step: usize, amplitude: f64 },
    /// Random offset plus a sinusoidal wave across the segment.
    Wavy { amplitude: f64, wave: f64, oscillations: f64 },
    /// Alternating drawn and skipped dashes along the direction of travel.
    Dashes,
}

/// Per-brush synthesis and rendering parameters.
///
/// Amplitudes and wave sizes are fractions of the brush size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushParams {
    pub texture: Texture,
    /// Interpolation steps per unit of distance travelled.
    pub steps_per_unit: f64,
    /// Minimum interpolation steps per accepted sample.
    pub min_steps: usize,
    /// Multiplier applied to the stroke width when rendering.
    pub width_scale: f64,
    /// Stroke opacity when rendering.
    pub opacity: f64,
}

impl BrushKind {
    pub const ALL: [BrushKind; 8] = [
        BrushKind::Plain,
        BrushKind::Pencil,
        BrushKind::Chalk,
        BrushKind::Watercolor,
        BrushKind::Crayon,
        BrushKind::Roller,
        BrushKind::Rainbow,
        BrushKind::Highlighter,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            BrushKind::Plain => "brush",
            BrushKind::Pencil => "pencil",
            BrushKind::Chalk => "chalk",
            BrushKind::Watercolor => "watercolor",
            BrushKind::Crayon => "crayon",
            BrushKind::Roller => "roller",
            BrushKind::Rainbow => "rainbow",
            BrushKind::Highlighter => "highlighter",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn params(&self) -> BrushParams {
        let plain = BrushParams {
            texture: Texture::Line,
            steps_per_unit: 1.0,
            min_steps: 1,
            width_scale: 1.0,
            opacity: 1.0,
        };
        match self {
            BrushKind::Plain | BrushKind::Rainbow => plain,
            BrushKind::Highlighter => BrushParams {
                width_scale: 2.0,
                opacity: 0.4,
                ..plain
            },
            // Pencil jitters within 20% of a width reduced to 40%.
            BrushKind::Pencil => BrushParams {
                texture: Texture::Jitter {
                    per_step: 1,
                    amplitude: 0.4 * 0.2,
                },
                steps_per_unit: 3.0,
                min_steps: 3,
                width_scale: 1.5,
                opacity: 0.6,
            },
            BrushKind::Chalk => BrushParams {
                texture: Texture::Jitter {
                    per_step: 2,
                    amplitude: 0.6,
                },
                steps_per_unit: 4.0,
                min_steps: 4,
                width_scale: 1.2,
                opacity: 0.8,
            },
            BrushKind::Watercolor => BrushParams {
                texture: Texture::Jitter {
                    per_step: 3,
                    amplitude: 1.0,
                },
                steps_per_unit: 4.0,
                min_steps: 4,
                width_scale: 1.8,
                opacity: 0.3,
            },
            BrushKind::Crayon => BrushParams {
                texture: Texture::Wavy {
                    amplitude: 0.5,
                    wave: 0.15,
                    oscillations: 6.0,
                },
                steps_per_unit: 4.0,
                min_steps: 4,
                width_scale: 1.4,
                opacity: 0.7,
            },
            BrushKind::Roller => BrushParams {
                texture: Texture::Dashes,
                steps_per_unit: 2.0,
                min_steps: 2,
                width_scale: 1.0,
                opacity: 1.0,
            },
        }
    }
}

/// Everything the synthesizer needs to know about the active brush.
///
/// Passed explicitly to [`StrokeSynthesizer::begin`] so the brush in effect
/// for a stroke is fixed when the stroke starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub kind: BrushKind,
    pub color: Color,
    pub size: f64,
    #[serde(default)]
    pub pattern: Option<StrokePattern>,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            kind: BrushKind::default(),
            color: Color::black(),
            size: DEFAULT_BRUSH_SIZE,
            pattern: None,
        }
    }
}

/// Generate a seed for a new stroke.
/// Counter + splitmix-style mixing, no clock or OS entropy needed.
fn generate_seed() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    static SEED_COUNTER: AtomicU64 = AtomicU64::new(1);

    let mut x = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Builds one stroke's path data from pointer samples.
#[derive(Debug, Clone)]
pub struct StrokeSynthesizer {
    /// Brush of the stroke in progress (None when idle).
    settings: Option<BrushSettings>,
    path: String,
    last_point: Point,
    last_time: Option<Instant>,
    /// Speed of the last accepted sample, in units per second.
    last_speed: f64,
    min_distance: f64,
    seed: u64,
    rng: SmallRng,
}

impl Default for StrokeSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SAMPLE_DISTANCE)
    }
}

impl StrokeSynthesizer {
    pub fn new(min_distance: f64) -> Self {
        Self {
            settings: None,
            path: String::new(),
            last_point: Point::ZERO,
            last_time: None,
            last_speed: 0.0,
            min_distance,
            seed: 0,
            rng: SmallRng::seed_from_u64(0),
        }
    }

    /// Start a stroke at `point`. Returns the single move-to.
    pub fn begin(&mut self, point: Point, settings: &BrushSettings) -> &str {
        self.begin_with_seed(point, settings, generate_seed())
    }

    /// Start a stroke with a fixed jitter seed, making it reproducible.
    pub fn begin_with_seed(&mut self, point: Point, settings: &BrushSettings, seed: u64) -> &str {
        self.settings = Some(*settings);
        self.last_point = point;
        self.last_time = Some(Instant::now());
        self.last_speed = 0.0;
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self.path.clear();
        push_command(&mut self.path, 'M', point);
        log::debug!("Stroke started at ({}, {}) with {:?}", point.x, point.y, settings.kind);
        &self.path
    }

    /// Feed the next pointer sample.
    ///
    /// Samples closer than the minimum distance to the last accepted sample,
    /// or arriving while no stroke is active, leave the path unchanged.
    pub fn extend(&mut self, point: Point) -> &str {
        let Some(settings) = self.settings else {
            return &self.path;
        };

        let distance = (point - self.last_point).hypot();
        // Negated so NaN samples are rejected too.
        if !(distance >= self.min_distance) {
            return &self.path;
        }

        let now = Instant::now();
        if let Some(last) = self.last_time {
            let elapsed = now.duration_since(last).as_secs_f64();
            self.last_speed = if elapsed > 0.0 { distance / elapsed } else { 0.0 };
        }

        extend_path(
            &mut self.path,
            &mut self.rng,
            self.last_point,
            point,
            settings.kind,
            settings.size,
        );

        self.last_point = point;
        self.last_time = Some(now);
        &self.path
    }

    /// Finish the stroke, returning its path and clearing all state.
    pub fn end(&mut self) -> String {
        self.settings = None;
        self.last_time = None;
        self.last_speed = 0.0;
        std::mem::take(&mut self.path)
    }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool {
        self.settings.is_some()
    }

    /// Path of the stroke in progress (empty when idle).
    pub fn current_path(&self) -> &str {
        &self.path
    }

    /// Brush of the stroke in progress.
    pub fn settings(&self) -> Option<&BrushSettings> {
        self.settings.as_ref()
    }

    /// Speed of the last accepted sample.
    pub fn last_speed(&self) -> f64 {
        self.last_speed
    }

    /// Jitter seed of the current (or last) stroke.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_min_distance(&mut self, min_distance: f64) {
        self.min_distance = min_distance;
    }
}

fn push_command(path: &mut String, command: char, point: Point) {
    if !path.is_empty() {
        path.push(' ');
    }
    // Writing into a String cannot fail.
    let _ = write!(path, "{} {} {}", command, point.x, point.y);
}

fn step_count(distance: f64, params: &BrushParams) -> usize {
    ((distance * params.steps_per_unit).floor() as usize)
        .clamp(params.min_steps, MAX_STEPS.max(params.min_steps))
}

fn jitter<R: Rng>(rng: &mut R, amplitude: f64) -> Vec2 {
    Vec2::new(
        rng.gen_range(-0.5..0.5) * amplitude,
        rng.gen_range(-0.5..0.5) * amplitude,
    )
}

/// Append the decoration for the segment `from → to` to `path`.
fn extend_path<R: Rng>(
    path: &mut String,
    rng: &mut R,
    from: Point,
    to: Point,
    kind: BrushKind,
    size: f64,
) {
    let params = kind.params();
    let delta = to - from;
    let distance = delta.hypot();

    match params.texture {
        Texture::Line => push_command(path, 'L', to),
        Texture::Jitter { per_step, amplitude } => {
            let steps = step_count(distance, &params);
            for i in 0..steps {
                let base = from.lerp(to, i as f64 / steps as f64);
                for _ in 0..per_step {
                    push_command(path, 'L', base + jitter(rng, amplitude * size));
                }
            }
        }
        Texture::Wavy {
            amplitude,
            wave,
            oscillations,
        } => {
            let steps = step_count(distance, &params);
            for i in 0..steps {
                let t = i as f64 / steps as f64;
                let angle = t * std::f64::consts::PI * oscillations;
                let wobble = Vec2::new(angle.sin(), angle.cos()) * (wave * size);
                let base = from.lerp(to, t);
                push_command(path, 'L', base + jitter(rng, amplitude * size) + wobble);
            }
        }
        Texture::Dashes => {
            let steps = step_count(distance, &params);
            let half = if distance > 0.0 {
                delta * (size / distance / 2.0)
            } else {
                Vec2::ZERO
            };
            for i in 0..=steps {
                let center = from.lerp(to, i as f64 / steps as f64);
                if i % 2 == 0 {
                    push_command(path, 'L', center - half);
                    push_command(path, 'L', center + half);
                } else {
                    push_command(path, 'M', center + half);
                }
            }
        }
    }
}
