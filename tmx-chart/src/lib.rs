//! Heatmap renderer for the temperature matrix.
//!
//! This crate provides:
//! - `config`: `HeatmapConfig`, loadable from JSON
//! - `state`: the explicit `ViewState` holding the display mode
//! - `scale` / `color`: band, linear and sequential color scales
//! - `scene`: the full set of visual primitives for one render
//! - `svg` / `page`: SVG serialization and the static page with its assets

pub mod color;
pub mod config;
pub mod page;
pub mod scale;
pub mod scene;
pub mod state;
pub mod svg;
pub mod tooltip;

pub use config::{ConfigError, HeatmapConfig, LegendDomain, Margin};
pub use scene::{render_scene, Scene};
pub use state::{DisplayMode, ViewState};
