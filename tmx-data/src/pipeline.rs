use crate::{
    aggregate::{aggregate, DailyIndex},
    error::Result,
    matrix::{build_matrix, MatrixCell},
    window::{earliest_year, latest_year, window, DEFAULT_WINDOW_YEARS},
};
use log::{debug, info};
use std::path::Path;
use tmx_core::{daily_record, DailyRecord, RowPolicy};

/// Settings for a full data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Trailing calendar years to keep.
    pub window_years: u32,
    /// Treatment of malformed input rows.
    pub policy: RowPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            window_years: DEFAULT_WINDOW_YEARS,
            policy: RowPolicy::default(),
        }
    }
}

/// Everything the renderer needs: the sorted cells and the daily lookup.
#[derive(Debug, Clone)]
pub struct HeatmapData {
    pub cells: Vec<MatrixCell>,
    pub daily: DailyIndex,
    pub latest_year: i32,
    /// Rows dropped while parsing.
    pub skipped: usize,
}

impl HeatmapData {
    /// Distinct years with at least one cell, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.cells.iter().map(|cell| cell.year).collect();
        years.dedup();
        years
    }

    /// Lowest and highest finite mean temperature over all cells.
    pub fn mean_extent(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .map(|cell| cell.mean_of_means)
            .filter(|value| value.is_finite())
            .fold(None, |extent, value| match extent {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }

    pub fn cell(&self, year: i32, month: u32) -> Option<&MatrixCell> {
        self.cells
            .iter()
            .find(|cell| cell.year == year && cell.month == month)
    }
}

/// Parse, window, aggregate and sort in one synchronous run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    /// Build the heatmap data from already parsed records.
    pub fn run(&self, records: &[DailyRecord]) -> Result<HeatmapData> {
        let latest = latest_year(records)?;
        let windowed = window(records, self.config.window_years)?;
        debug!(
            "Window {}..={} keeps {} of {} records",
            earliest_year(latest, self.config.window_years),
            latest,
            windowed.len(),
            records.len()
        );

        let aggregation = aggregate(&windowed);
        let cells = build_matrix(&aggregation.monthly);
        debug!(
            "Indexed {} daily records into {} cells",
            aggregation.daily.record_count(),
            aggregation.daily.cell_count()
        );
        info!(
            "Built {} cells over {} years ending {}",
            cells.len(),
            aggregation.monthly.years().len(),
            latest
        );

        Ok(HeatmapData {
            cells,
            daily: aggregation.daily,
            latest_year: latest,
            skipped: 0,
        })
    }

    /// Build the heatmap data from CSV text.
    pub fn run_csv_str(&self, csv_data: &str) -> Result<HeatmapData> {
        let outcome = daily_record::read_csv_str(csv_data, self.config.policy)?;
        let mut data = self.run(&outcome.records)?;
        data.skipped = outcome.skipped;
        Ok(data)
    }

    /// Build the heatmap data from a CSV file.
    pub fn run_path<P: AsRef<Path>>(&self, path: P) -> Result<HeatmapData> {
        let outcome = daily_record::read_csv_path(path, self.config.policy)?;
        let mut data = self.run(&outcome.records)?;
        data.skipped = outcome.skipped;
        Ok(data)
    }
}
