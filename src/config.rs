//! Engine configuration, loadable from JSON.
//!
//! Every field is optional in the JSON form; missing fields take the crate
//! defaults from `consts`. The hit-test and resize thresholds are not
//! configurable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    COLOR_SAMPLE_INTERVAL_MS, COLOR_SAMPLE_MIN_MOVE, DUPLICATE_OFFSET, GRID_PERIOD, VIRTUAL_HEIGHT, VIRTUAL_WIDTH,
};
use crate::error::ConfigError;
use crate::viewport::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Virtual surface width in units.
    pub virtual_width: u32,
    /// Virtual surface height in units.
    pub virtual_height: u32,
    /// Background grid spacing.
    pub grid_period: f64,
    /// Offset on both axes applied to duplicates.
    pub duplicate_offset: f64,
    /// Hover color preview debounce.
    pub color_sample_interval_ms: u32,
    /// Minimum pointer travel before a hover resample.
    pub color_sample_min_move: f64,
    /// Whether dropped images become the selection. Pasted images always do.
    pub auto_select_dropped: bool,
    /// Start with the viewport centered in the virtual surface.
    pub center_initial_pan: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            virtual_width: VIRTUAL_WIDTH,
            virtual_height: VIRTUAL_HEIGHT,
            grid_period: GRID_PERIOD,
            duplicate_offset: DUPLICATE_OFFSET,
            color_sample_interval_ms: COLOR_SAMPLE_INTERVAL_MS,
            color_sample_min_move: COLOR_SAMPLE_MIN_MOVE,
            auto_select_dropped: false,
            center_initial_pan: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed input and the `validate`
    /// error for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Names the first field that is zero, negative, or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.virtual_width == 0 {
            return Err(ConfigError::NotPositive { field: "virtual_width" });
        }
        if self.virtual_height == 0 {
            return Err(ConfigError::NotPositive { field: "virtual_height" });
        }
        if self.grid_period.is_nan() || self.grid_period <= 0.0 {
            return Err(ConfigError::NotPositive { field: "grid_period" });
        }
        if self.color_sample_min_move.is_nan() || self.color_sample_min_move < 0.0 {
            return Err(ConfigError::Negative { field: "color_sample_min_move" });
        }
        if !self.duplicate_offset.is_finite() {
            return Err(ConfigError::NotFinite { field: "duplicate_offset" });
        }
        Ok(())
    }

    #[must_use]
    pub fn virtual_size(&self) -> Size {
        Size::new(f64::from(self.virtual_width), f64::from(self.virtual_height))
    }
}
