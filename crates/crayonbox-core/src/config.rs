//! Canvas tuning knobs, loadable from JSON.

use crate::brush::{BrushSettings, DEFAULT_BRUSH_SIZE, DEFAULT_MIN_SAMPLE_DISTANCE};
use crate::history::MAX_UNDO_HISTORY;
use crate::sticker::DEFAULT_STICKER_SIZE;
use crate::storage::DEFAULT_AUTOSAVE_INTERVAL_SECS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a coloring canvas. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Pointer samples closer than this are dropped.
    pub min_sample_distance: f64,
    pub max_undo_history: usize,
    pub brush_size: f64,
    pub sticker_size: f64,
    pub autosave_interval_secs: u64,
    pub rainbow_interval_ms: u64,
    /// Side of the square view box the outlines are drawn in.
    pub view_box: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_sample_distance: DEFAULT_MIN_SAMPLE_DISTANCE,
            max_undo_history: MAX_UNDO_HISTORY,
            brush_size: DEFAULT_BRUSH_SIZE,
            sticker_size: DEFAULT_STICKER_SIZE,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            rainbow_interval_ms: 500,
            view_box: 100.0,
        }
    }
}

impl CanvasConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Brush a session starts with when it does not pick one.
    pub fn default_brush(&self) -> BrushSettings {
        BrushSettings {
            size: self.brush_size,
            ..Default::default()
        }
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn rainbow_interval(&self) -> Duration {
        Duration::from_millis(self.rainbow_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json(r#"{ "brush_size": 12, "view_box": 200 }"#).unwrap();
        assert_eq!(config.brush_size, 12.0);
        assert_eq!(config.view_box, 200.0);
        assert_eq!(config.min_sample_distance, 0.5);
        assert_eq!(config.max_undo_history, 50);
        assert_eq!(config.rainbow_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(CanvasConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sticker_size": 32 }}"#).unwrap();

        let config = CanvasConfig::load(file.path()).unwrap();
        assert_eq!(config.sticker_size, 32.0);

        let missing = CanvasConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_roundtrip_default() {
        let json = CanvasConfig::default().to_json().unwrap();
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), CanvasConfig::default());
    }
}
