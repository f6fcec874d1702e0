//! Render the heatmap site from a daily temperature CSV.

use anyhow::Context;
use log::{error, info, warn};
use std::path::Path;
use tmx_chart::{page::site_files, render_scene, DisplayMode, HeatmapConfig, ViewState};
use tmx_core::RowPolicy;
use tmx_data::{Pipeline, PipelineConfig};

/// Load, aggregate and render `input` into `output_dir`.
///
/// A CSV that cannot be loaded is logged and nothing is written; the command
/// still succeeds so a missing data file never crashes the caller. Bad
/// configuration and unwritable output are real errors.
pub fn run_render(
    input: &Path,
    output_dir: &Path,
    config_path: Option<&Path>,
    mode: Option<DisplayMode>,
    policy: RowPolicy,
    years: u32,
) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => HeatmapConfig::from_path(path)
            .with_context(|| format!("Failed to load chart configuration {}", path.display()))?,
        None => HeatmapConfig::default(),
    };

    let pipeline = Pipeline::new(PipelineConfig {
        window_years: years,
        policy,
    });
    let data = match pipeline.run_path(input) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to load {}: {}", input.display(), e);
            return Ok(());
        }
    };
    if data.skipped > 0 {
        warn!("{} malformed rows were dropped from {}", data.skipped, input.display());
    }

    let view = ViewState::new(mode.unwrap_or(config.initial_mode));
    let scene = render_scene(&data, &view, &config);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let files = site_files(&scene, &config);
    for file in &files {
        let path = output_dir.join(file.name);
        std::fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    info!(
        "Rendered {} cells ({} mode) into {} files under {}",
        scene.cells.len(),
        view.mode(),
        files.len(),
        output_dir.display()
    );
    Ok(())
}
