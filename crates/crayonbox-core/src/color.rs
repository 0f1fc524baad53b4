//! Colors, the kid palette and the rainbow cycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("color must have 3, 6 or 8 hex digits: {0}")]
    BadLength(String),
    #[error("invalid hex digit in color: {0}")]
    BadDigit(String),
}

/// RGBA8 color, serialized as a `#RRGGBB` (or `#RRGGBBAA`) string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(hex.to_string()))?;
        if !digits.is_ascii() {
            return Err(ColorParseError::BadDigit(hex.to_string()));
        }

        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::BadDigit(hex.to_string()))
        };

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c
                        .to_digit(16)
                        .ok_or_else(|| ColorParseError::BadDigit(hex.to_string()))?
                        as u8;
                    channels[i] = v * 17;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Self::rgb(byte(&digits[0..2])?, byte(&digits[2..4])?, byte(&digits[4..6])?)),
            8 => Ok(Self::rgba(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(ColorParseError::BadLength(hex.to_string())),
        }
    }

    /// Format as uppercase hex; the alpha pair is only written when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Bright palette offered by the color picker.
pub const PALETTE: [Color; 25] = [
    Color::rgb(0xFF, 0x00, 0x00),
    Color::rgb(0xFF, 0x45, 0x00),
    Color::rgb(0xFF, 0x7F, 0x00),
    Color::rgb(0xFF, 0xD7, 0x00),
    Color::rgb(0xFF, 0xFF, 0x00),
    Color::rgb(0xAD, 0xFF, 0x2F),
    Color::rgb(0x00, 0xFF, 0x00),
    Color::rgb(0x00, 0xFF, 0xFF),
    Color::rgb(0x1E, 0x90, 0xFF),
    Color::rgb(0x00, 0x00, 0xFF),
    Color::rgb(0x8A, 0x2B, 0xE2),
    Color::rgb(0x94, 0x00, 0xD3),
    Color::rgb(0xFF, 0x14, 0x93),
    Color::rgb(0xFF, 0x69, 0xB4),
    Color::rgb(0xFF, 0xC0, 0xCB),
    Color::rgb(0x8B, 0x45, 0x13),
    Color::rgb(0xA0, 0x52, 0x2D),
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xFF, 0xFF, 0xFF),
    Color::rgb(0xFF, 0xA5, 0x00),
    Color::rgb(0x32, 0xCD, 0x32),
    Color::rgb(0xFF, 0x00, 0xFF),
    Color::rgb(0x00, 0xCE, 0xD1),
    Color::rgb(0xFF, 0x63, 0x47),
    Color::rgb(0x93, 0x70, 0xDB),
];

/// Colors the rainbow brush steps through.
pub const RAINBOW: [Color; 7] = [
    Color::rgb(0xFF, 0x00, 0x00),
    Color::rgb(0xFF, 0x7F, 0x00),
    Color::rgb(0xFF, 0xFF, 0x00),
    Color::rgb(0x00, 0xFF, 0x00),
    Color::rgb(0x00, 0x00, 0xFF),
    Color::rgb(0x4B, 0x00, 0x82),
    Color::rgb(0x94, 0x00, 0xD3),
];

/// Default step between rainbow colors.
pub const DEFAULT_RAINBOW_INTERVAL: Duration = Duration::from_millis(500);

/// Timer-driven rainbow color index.
///
/// The rainbow brush draws plain geometry; only its color changes, one step
/// per elapsed interval, independently of pointer input.
#[derive(Debug, Clone)]
pub struct RainbowCycle {
    index: usize,
    interval: Duration,
    pending: Duration,
}

impl RainbowCycle {
    pub fn new(interval: Duration) -> Self {
        Self {
            index: 0,
            interval,
            pending: Duration::ZERO,
        }
    }

    /// Current color.
    pub fn current(&self) -> Color {
        RAINBOW[self.index]
    }

    /// Step to the next color, wrapping around.
    pub fn advance(&mut self) -> Color {
        self.index = (self.index + 1) % RAINBOW.len();
        self.current()
    }

    /// Feed elapsed time; advances once per whole interval.
    pub fn tick(&mut self, elapsed: Duration) -> Color {
        if self.interval.is_zero() {
            return self.current();
        }
        self.pending += elapsed;
        while self.pending >= self.interval {
            self.pending -= self.interval;
            self.advance();
        }
        self.current()
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.pending = Duration::ZERO;
    }
}

impl Default for RainbowCycle {
    fn default() -> Self {
        Self::new(DEFAULT_RAINBOW_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FF5252").unwrap(), Color::rgb(0xFF, 0x52, 0x52));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::white());
        assert_eq!(Color::from_hex("#00000080").unwrap(), Color::rgba(0, 0, 0, 0x80));
        assert!(matches!(Color::from_hex("FF0000"), Err(ColorParseError::MissingHash(_))));
        assert!(matches!(Color::from_hex("#FF00"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(Color::from_hex("#GG0000"), Err(ColorParseError::BadDigit(_))));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Color::rgb(0x1E, 0x90, 0xFF).to_hex(), "#1E90FF");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let back: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(back, Color::rgb(0, 255, 0));
        assert!(serde_json::from_str::<Color>("\"green\"").is_err());
    }

    #[test]
    fn test_rainbow_cycle_ticks() {
        let mut cycle = RainbowCycle::new(Duration::from_millis(500));
        assert_eq!(cycle.current(), RAINBOW[0]);

        cycle.tick(Duration::from_millis(300));
        assert_eq!(cycle.current(), RAINBOW[0]);

        cycle.tick(Duration::from_millis(300));
        assert_eq!(cycle.current(), RAINBOW[1]);

        cycle.tick(Duration::from_millis(1000));
        assert_eq!(cycle.current(), RAINBOW[3]);
    }

    #[test]
    fn test_rainbow_cycle_wraps() {
        let mut cycle = RainbowCycle::default();
        for _ in 0..RAINBOW.len() {
            cycle.advance();
        }
        assert_eq!(cycle.current(), RAINBOW[0]);
    }
}
