//! Runtime configuration.
//!
//! Every section has sensible defaults. A TOML file can override any subset
//! of fields, and command-line flags override the file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MathSimError, Result};
use crate::plot::MIN_GRID_SPACING;

/// Smallest accepted plot scale, in pixels per world unit.
pub const MIN_SCALE: f64 = 1.0;

/// Default endpoint of the simplify/derive/solve service.
pub const DEFAULT_API_URL: &str = "https://newton.vercel.app/api/v2";

/// Configuration for the function plotter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Pixels per world unit.
    pub scale: f64,
    /// Fixed pixel spacing of the background grid.
    pub grid_spacing: f64,
    /// Half-length of an axis tick mark in pixels.
    pub tick_half_length: f64,
    /// Font used for tick labels.
    pub label_font: String,
    /// Stroke width of the axes.
    pub axis_width: f64,
    /// Stroke width of the plotted curve.
    pub curve_width: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 400,
            scale: 40.0,
            grid_spacing: 40.0,
            tick_half_length: 5.0,
            label_font: "12px monospace".to_string(),
            axis_width: 2.0,
            curve_width: 2.0,
        }
    }
}

/// Configuration for the remote math API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; requests go to `{base_url}/{operation}/{expression}`.
    pub base_url: String,
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,
    /// Extra attempts after a failed request.
    pub retries: u32,
}

impl ApiConfig {
    /// Per-attempt timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
            retries: 0,
        }
    }
}

/// Configuration for the practice loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    /// Delay before a new problem replaces a correctly answered one.
    pub next_problem_delay_ms: u64,
}

impl PracticeConfig {
    /// Delay before the next problem as a duration.
    pub fn next_problem_delay(&self) -> Duration {
        Duration::from_millis(self.next_problem_delay_ms)
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            next_problem_delay_ms: 1200,
        }
    }
}

/// Combined configuration for all components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Plotter settings.
    pub plot: PlotConfig,
    /// Remote API settings.
    pub api: ApiConfig,
    /// Practice loop settings.
    pub practice: PracticeConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MathSimError::file_open(path.to_path_buf(), e))?;
        Self::from_toml(&content).map_err(|e| MathSimError::config(path.to_path_buf(), e))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if !(self.plot.scale.is_finite() && self.plot.scale >= MIN_SCALE) {
            return Err(format!(
                "plot.scale must be at least {} pixel per unit, got {}",
                MIN_SCALE, self.plot.scale
            ));
        }
        if !(self.plot.grid_spacing.is_finite() && self.plot.grid_spacing >= MIN_GRID_SPACING) {
            return Err(format!(
                "plot.grid_spacing must be at least {} pixel, got {}",
                MIN_GRID_SPACING, self.plot.grid_spacing
            ));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err("plot.width and plot.height must be non-zero".to_string());
        }
        Ok(())
    }
}
