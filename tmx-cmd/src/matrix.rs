//! CSV export of the matrix cells.

use anyhow::Context;
use log::info;
use serde::Serialize;
use std::{fs::File, io::Write, path::Path};
use tmx_core::RowPolicy;
use tmx_data::{MatrixCell, Pipeline, PipelineConfig};

/// One exported cell. Months are 1-based in the export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatrixRow {
    pub year: i32,
    pub month: u32,
    pub mean_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
}

impl From<&MatrixCell> for MatrixRow {
    fn from(cell: &MatrixCell) -> Self {
        MatrixRow {
            year: cell.year,
            month: cell.month + 1,
            mean_temperature: cell.mean_of_means,
            max_temperature: cell.max_of_max,
            min_temperature: cell.min_of_min,
        }
    }
}

/// Write cells in matrix order, with a header row.
pub fn write_matrix<W: Write>(cells: &[MatrixCell], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for cell in cells {
        wtr.serialize(MatrixRow::from(cell))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run_matrix(
    input: &Path,
    output: Option<&Path>,
    policy: RowPolicy,
    years: u32,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(PipelineConfig {
        window_years: years,
        policy,
    });
    let data = pipeline
        .run_path(input)
        .with_context(|| format!("Failed to build the matrix from {}", input.display()))?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_matrix(&data.cells, file)?;
            info!("Wrote {} cells to {}", data.cells.len(), path.display());
        }
        None => write_matrix(&data.cells, std::io::stdout().lock())?,
    }
    Ok(())
}
