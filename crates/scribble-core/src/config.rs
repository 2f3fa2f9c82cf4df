//! Engine configuration.

use crate::shapes::TextAnnotation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for one annotation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of history entries (None = unbounded).
    pub history_capacity: Option<usize>,
    /// Eraser width relative to the brush size.
    pub eraser_width_multiplier: f64,
    /// Content given to a freshly placed text annotation.
    pub text_placeholder: String,
    /// Font size for new text annotations.
    pub text_font_size: f64,
    /// Color used until the toolbar sends one.
    pub default_color: String,
    /// Brush size used until the toolbar sends one.
    pub default_brush_size: u32,
    /// Pointer slop for hit testing in select mode.
    pub hit_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: None,
            eraser_width_multiplier: 3.0,
            text_placeholder: "Text".to_string(),
            text_font_size: TextAnnotation::DEFAULT_FONT_SIZE,
            default_color: "#000000".to_string(),
            default_brush_size: 4,
            hit_tolerance: 4.0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration document. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "history_capacity must hold at least one entry".to_string(),
            ));
        }
        if !(self.eraser_width_multiplier.is_finite() && self.eraser_width_multiplier > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "eraser_width_multiplier must be positive, got {}",
                self.eraser_width_multiplier
            )));
        }
        if !(self.text_font_size.is_finite() && self.text_font_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "text_font_size must be positive, got {}",
                self.text_font_size
            )));
        }
        if self.default_brush_size == 0 {
            return Err(ConfigError::Invalid(
                "default_brush_size must be positive".to_string(),
            ));
        }
        let eraser_width = f64::from(self.default_brush_size) * self.eraser_width_multiplier;
        if !eraser_width.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "eraser_width_multiplier {} overflows the eraser width",
                self.eraser_width_multiplier
            )));
        }
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hit_tolerance must be non-negative, got {}",
                self.hit_tolerance
            )));
        }
        Ok(())
    }
}
