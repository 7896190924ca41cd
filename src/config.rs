//! Editor configuration.
//!
//! Every field has a default, so hosts only spell out what they change:
//!
//! ```json
//! { "min_scale": 0.25, "show_debug_overlay": false }
//! ```

use serde::Deserialize;

use crate::consts::{
    COARSE_GRID_BELOW, COARSE_GRID_PITCH, DEFAULT_FONT_FACE, GRID_PITCH, MIN_SCALE, OUTLINE_PADDING, ZOOM_STEP,
};
use crate::error::ConfigError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Lowest viewport scale reachable by zooming out.
    pub min_scale: f64,
    /// Scale change per wheel event.
    pub zoom_step: f64,
    /// World-space grid pitch.
    pub grid_pitch: f64,
    /// Grid pitch once `scale_x` drops below `coarse_grid_below`.
    pub coarse_grid_pitch: f64,
    pub coarse_grid_below: f64,
    /// World-space gap between an element and its hover/selection outline.
    pub outline_padding: f64,
    pub show_grid: bool,
    pub show_debug_overlay: bool,
    /// Font family for text elements that don't name one.
    pub default_font_face: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            zoom_step: ZOOM_STEP,
            grid_pitch: GRID_PITCH,
            coarse_grid_pitch: COARSE_GRID_PITCH,
            coarse_grid_below: COARSE_GRID_BELOW,
            outline_padding: OUTLINE_PADDING,
            show_grid: true,
            show_debug_overlay: true,
            default_font_face: DEFAULT_FONT_FACE.to_owned(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_scale", self.min_scale)?;
        positive("grid_pitch", self.grid_pitch)?;
        positive("coarse_grid_pitch", self.coarse_grid_pitch)?;
        non_negative("zoom_step", self.zoom_step)?;
        non_negative("coarse_grid_below", self.coarse_grid_below)?;
        non_negative("outline_padding", self.outline_padding)?;
        if self.default_font_face.trim().is_empty() {
            return Err(ConfigError::Invalid("default_font_face must not be empty".into()));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be a positive number, got {value}")))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be a non-negative number, got {value}")))
    }
}
