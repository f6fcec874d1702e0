//! Chart configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "legend_domain": "data_extent", "initial_mode": "min" }
//! ```

use crate::state::DisplayMode;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Outer margins around the grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 40.0,
            right: 60.0,
            bottom: 40.0,
            left: 60.0,
        }
    }
}

/// Where the color scale and legend take their domain from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendDomain {
    /// A fixed temperature range, comparable across datasets.
    Fixed { min: f64, max: f64 },
    /// The observed min/max of the cells' mean temperature.
    DataExtent,
}

impl Default for LegendDomain {
    fn default() -> Self {
        LegendDomain::Fixed {
            min: 0.0,
            max: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Inner and outer padding of both band scales, as a fraction of the step.
    pub band_padding: f64,
    pub legend_domain: LegendDomain,
    pub legend_width: f64,
    /// Gap between the grid and the legend.
    pub legend_offset: f64,
    /// Number of interpolation stops in the legend gradient.
    pub legend_stops: usize,
    /// Approximate number of legend axis ticks.
    pub legend_ticks: usize,
    /// Temperature range mapped onto a cell's height by its sparkline.
    pub sparkline_domain: [f64; 2],
    pub sparkline_inset: f64,
    pub sparkline_stroke: String,
    pub sparkline_stroke_width: f64,
    /// Fill for cells whose statistic is not a number.
    pub no_data_fill: String,
    pub transition_ms: u64,
    pub initial_mode: DisplayMode,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        HeatmapConfig {
            title: "Daily Temperature Matrix".to_string(),
            width: 1000.0,
            height: 600.0,
            margin: Margin::default(),
            band_padding: 0.05,
            legend_domain: LegendDomain::default(),
            legend_width: 20.0,
            legend_offset: 20.0,
            legend_stops: 10,
            legend_ticks: 8,
            sparkline_domain: [0.0, 40.0],
            sparkline_inset: 2.0,
            sparkline_stroke: "rgba(0,0,0,0.65)".to_string(),
            sparkline_stroke_width: 1.5,
            no_data_fill: "#cccccc".to_string(),
            transition_ms: 400,
            initial_mode: DisplayMode::Maximum,
        }
    }
}

impl HeatmapConfig {
    /// Width of the grid area inside the margins.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the grid area inside the margins.
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: HeatmapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ConfigError::Invalid(
                "margins leave no room for the grid".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(ConfigError::Invalid(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        if self.legend_stops < 2 {
            return Err(ConfigError::Invalid(
                "legend_stops must be at least 2".to_string(),
            ));
        }
        if let LegendDomain::Fixed { min, max } = self.legend_domain {
            if min.is_nan() || max.is_nan() || min >= max {
                return Err(ConfigError::Invalid(format!(
                    "fixed legend domain needs min < max, got [{min}, {max}]"
                )));
            }
        }
        if self.sparkline_domain[0] == self.sparkline_domain[1] {
            return Err(ConfigError::Invalid(
                "sparkline_domain must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
