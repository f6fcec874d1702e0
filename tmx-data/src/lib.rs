//! Data processing for daily temperature records.
//!
//! This crate turns a flat daily series into the (year, month) statistics
//! matrix used by the heatmap, plus the per-cell daily sequences used for
//! sparklines:
//!
//! 1. [`window`] keeps the trailing N calendar years.
//! 2. [`aggregate`] groups by (year, month) and computes the statistics.
//! 3. [`matrix`] flattens and sorts the groups into cells.
//! 4. [`pipeline`] chains the three.

pub mod aggregate;
pub mod error;
pub mod matrix;
pub mod pipeline;
pub mod window;

pub use aggregate::{aggregate, Aggregation, CellKey, DailyIndex, MonthlyAggregate, MonthlyGrouping};
pub use error::{DataError, Result};
pub use matrix::{build_matrix, MatrixCell};
pub use pipeline::{HeatmapData, Pipeline, PipelineConfig};
pub use window::{earliest_year, latest_year, window, DEFAULT_WINDOW_YEARS};
