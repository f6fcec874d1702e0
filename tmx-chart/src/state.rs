//! View state for the heatmap.
//!
//! The display mode lives here rather than in ambient globals. The only way
//! to change it is [`ViewState::toggle`], and changing it only affects which
//! statistic drives the cell colors.

use serde::Deserialize;
use std::{fmt, str::FromStr};
use tmx_data::MatrixCell;

/// Which statistic is color-encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum DisplayMode {
    #[default]
    #[serde(rename = "max")]
    Maximum,
    #[serde(rename = "min")]
    Minimum,
}

impl DisplayMode {
    /// The other mode.
    pub fn flipped(self) -> Self {
        match self {
            DisplayMode::Maximum => DisplayMode::Minimum,
            DisplayMode::Minimum => DisplayMode::Maximum,
        }
    }

    /// Short name used in page attributes ("max" / "min").
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Maximum => "max",
            DisplayMode::Minimum => "min",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max" | "maximum" => Ok(DisplayMode::Maximum),
            "min" | "minimum" => Ok(DisplayMode::Minimum),
            other => Err(format!("unknown display mode {other:?} (expected max or min)")),
        }
    }
}

/// Mutable view state passed into color mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    mode: DisplayMode,
}

impl ViewState {
    pub fn new(mode: DisplayMode) -> Self {
        ViewState { mode }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Switch between maximum and minimum, returning the new mode.
    pub fn toggle(&mut self) -> DisplayMode {
        self.mode = self.mode.flipped();
        self.mode
    }

    /// The value that drives a cell's color under the current mode.
    pub fn value_of(&self, cell: &MatrixCell) -> f64 {
        value_for(self.mode, cell)
    }
}

/// The value that drives a cell's color under `mode`.
pub fn value_for(mode: DisplayMode, cell: &MatrixCell) -> f64 {
    match mode {
        DisplayMode::Maximum => cell.max_of_max,
        DisplayMode::Minimum => cell.min_of_min,
    }
}
