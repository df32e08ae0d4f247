//! Editor configuration.

use crate::entities::{ConnectorGeometry, SerializableColor};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
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

/// Tunable constants for the editing engine.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Radius of player, ball and cone glyphs.
    pub token_radius: f64,
    /// Erase/drag pick radius, in token radii.
    pub hit_radius_factor: f64,
    /// Freehand stroke color.
    pub stroke_color: SerializableColor,
    /// Freehand stroke width.
    pub stroke_width: f64,
    /// Pass connector dash length.
    pub dash_length: f64,
    /// Pass connector gap length.
    pub gap_length: f64,
    /// Dribble connector wave periods.
    pub wave_count: u32,
    /// Dribble connector wave amplitude.
    pub wave_amplitude: f64,
    /// Length of each arrowhead stroke.
    pub arrow_head_size: f64,
    /// Maximum number of undo states (`None` = unbounded).
    pub history_limit: Option<usize>,
    /// Key under which the board is persisted.
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            token_radius: 12.0,
            hit_radius_factor: 1.8,
            stroke_color: SerializableColor::rgb(0x2c3e50),
            stroke_width: 3.0,
            dash_length: 12.0,
            gap_length: 8.0,
            wave_count: 6,
            wave_amplitude: 6.0,
            arrow_head_size: 12.0,
            history_limit: None,
            storage_key: "board:current".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Pick radius for erase and drag.
    pub fn hit_radius(&self) -> f64 {
        self.token_radius * self.hit_radius_factor
    }

    /// Connector path parameters.
    pub fn connector_geometry(&self) -> ConnectorGeometry {
        ConnectorGeometry {
            dash_length: self.dash_length,
            gap_length: self.gap_length,
            wave_count: self.wave_count,
            wave_amplitude: self.wave_amplitude,
            arrow_head_size: self.arrow_head_size,
        }
    }
}
