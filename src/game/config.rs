use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::speed::SpeedRamp;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid (columns)
    pub grid_width: usize,
    /// Height of the game grid (rows)
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_length: usize,

    /// Starting speed in cells per second
    pub base_speed: f64,
    /// Speed added per food eaten
    pub speed_gain: f64,
    /// Speed ceiling in cells per second
    pub max_speed: f64,

    /// Frames per second the terminal loop is capped at
    pub frame_rate_cap: u32,
    /// Longest frame delta fed into the simulation, in seconds
    pub max_frame_dt: f64,

    /// Seed for food placement; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 42,
            grid_height: 24,
            initial_length: 6,
            base_speed: 6.0,
            speed_gain: 0.10,
            max_speed: 12.0,
            frame_rate_cap: 120,
            max_frame_dt: 0.1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            initial_length: 3,
            ..Self::new(10, 10)
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn speed_ramp(&self) -> SpeedRamp {
        SpeedRamp::new(self.base_speed, self.speed_gain, self.max_speed)
    }

    /// Validate the configuration
    ///
    /// The starting body is laid out leftward from column `grid_width / 3`,
    /// so it has to fit in the columns left of that.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 2 || self.grid_height < 1 {
            return Err(format!(
                "grid must be at least 2x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err("grid dimensions must fit in i32".to_string());
        }

        if self.initial_length == 0 {
            return Err("initial_length must be at least 1".to_string());
        }

        let max_length = self.grid_width / 3 + 1;
        if self.initial_length > max_length {
            return Err(format!(
                "initial_length {} does not fit a {}-wide grid (max {})",
                self.initial_length, self.grid_width, max_length
            ));
        }

        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(format!(
                "base_speed must be positive, got {}",
                self.base_speed
            ));
        }

        if !(self.speed_gain.is_finite() && self.speed_gain >= 0.0) {
            return Err(format!(
                "speed_gain must be non-negative, got {}",
                self.speed_gain
            ));
        }

        if !self.max_speed.is_finite() || self.max_speed < self.base_speed {
            return Err(format!(
                "max_speed must be at least base_speed ({}), got {}",
                self.base_speed, self.max_speed
            ));
        }

        if self.frame_rate_cap == 0 {
            return Err("frame_rate_cap must be positive".to_string());
        }

        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(format!(
                "max_frame_dt must be positive, got {}",
                self.max_frame_dt
            ));
        }

        Ok(())
    }
}
