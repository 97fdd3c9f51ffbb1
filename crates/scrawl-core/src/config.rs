//! Editor configuration.

use crate::camera::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};
use crate::elements::Text;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spacing of the background grid in screen pixels.
pub const GRID_SIZE: f64 = 50.0;
/// Viewport size used until the first resize event.
pub const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid zoom limits: min {min}, max {max}")]
    ZoomLimits { min: f64, max: f64 },
    #[error("Zoom step must be greater than 1, got {0}")]
    ZoomStep(f64),
    #[error("Grid size must be positive, got {0}")]
    GridSize(f64),
    #[error("Viewport must be positive and finite, got {0}x{1}")]
    Viewport(f64, f64),
}

/// Tunable editor settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    pub grid_size: f64,
    pub viewport: Size,
    /// Content of text placed with the text tool.
    pub text_placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            grid_size: GRID_SIZE,
            viewport: DEFAULT_VIEWPORT,
            text_placeholder: Text::PLACEHOLDER.to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the camera and grid cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite()) {
            return Err(ConfigError::ZoomLimits {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        if !(self.grid_size > 0.0 && self.grid_size.is_finite()) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0 && self.viewport.is_finite())
        {
            return Err(ConfigError::Viewport(self.viewport.width, self.viewport.height));
        }
        Ok(())
    }
}
