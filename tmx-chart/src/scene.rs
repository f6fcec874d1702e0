//! The full set of visual primitives for one render.
//!
//! [`render_scene`] is a pure function of the data, the view state and the
//! configuration. Nothing is diffed: every load builds a fresh `Scene`, and a
//! mode toggle only re-selects which precomputed fill each cell shows.

use crate::{
    color::ColorScale,
    config::HeatmapConfig,
    scale::{ticks, BandScale, LinearScale},
    state::{value_for, DisplayMode, ViewState},
    tooltip::tooltip_html,
};
use log::debug;
use tmx_data::{CellKey, DailyIndex, HeatmapData, MatrixCell};
use tmx_utils::dates::month_name;

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellShape {
    pub key: CellKey,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_max: String,
    pub fill_min: String,
    pub tooltip: String,
}

impl CellShape {
    pub fn fill(&self, mode: DisplayMode) -> &str {
        match mode {
            DisplayMode::Maximum => &self.fill_max,
            DisplayMode::Minimum => &self.fill_min,
        }
    }
}

/// Daily mean trend drawn inside one cell, in cell-local coordinates.
///
/// Non-finite days break the line, so a poisoned day leaves a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    pub key: CellKey,
    /// Top-left corner of the owning cell.
    pub origin: (f64, f64),
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl Sparkline {
    /// SVG path data, one `M…L…` run per segment.
    pub fn path_data(&self) -> String {
        let mut d = String::new();
        for segment in &self.segments {
            for (i, (x, y)) in segment.iter().enumerate() {
                let command = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{}{:.2},{:.2}", command, x, y));
            }
        }
        d
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub class: &'static str,
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendStop {
    /// Percent along the bar, bottom (0) to top (100).
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendTick {
    /// Vertical position within the legend bar.
    pub y: f64,
    pub label: String,
}

/// Vertical gradient bar with a tick axis on its right.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub domain: (f64, f64),
    pub stops: Vec<LegendStop>,
    pub ticks: Vec<LegendTick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Translation of the grid group.
    pub origin: (f64, f64),
    pub mode: DisplayMode,
    pub transition_ms: u64,
    pub cells: Vec<CellShape>,
    pub sparklines: Vec<Sparkline>,
    pub sparkline_stroke: String,
    pub sparkline_stroke_width: f64,
    pub month_labels: Vec<Label>,
    pub year_labels: Vec<Label>,
    pub legend: Legend,
}

impl Scene {
    /// Re-encode colors for a new view state. Geometry is untouched.
    pub fn apply_view(&mut self, view: &ViewState) {
        self.mode = view.mode();
    }
}

/// Compute every primitive for the heatmap.
pub fn render_scene(data: &HeatmapData, view: &ViewState, config: &HeatmapConfig) -> Scene {
    let width = config.inner_width();
    let height = config.inner_height();

    let years = data.years();
    let x_scale = BandScale::new(years.clone(), (0.0, width), config.band_padding);
    let y_scale = BandScale::new((0..12).collect::<Vec<u32>>(), (0.0, height), config.band_padding);
    let colors = ColorScale::for_data(config.legend_domain, data, config.no_data_fill.clone());

    let cells: Vec<CellShape> = data
        .cells
        .iter()
        .filter_map(|cell| cell_shape(cell, &x_scale, &y_scale, &colors))
        .collect();

    let sparklines = sparklines(&data.cells, &data.daily, &x_scale, &y_scale, config);
    debug!(
        "Scene: {} cells, {} sparklines, color domain {:?}",
        cells.len(),
        sparklines.len(),
        colors.domain
    );

    let month_labels = (0..12u32)
        .filter_map(|month| {
            y_scale.center(&month).map(|y| Label {
                class: "month-label",
                x: -10.0,
                y,
                anchor: Anchor::End,
                text: month_name(month).to_string(),
            })
        })
        .collect();

    let year_labels = years
        .iter()
        .filter_map(|year| {
            x_scale.center(year).map(|x| Label {
                class: "year-label",
                x,
                y: -10.0,
                anchor: Anchor::Middle,
                text: year.to_string(),
            })
        })
        .collect();

    Scene {
        width: config.width,
        height: config.height,
        origin: (config.margin.left, config.margin.top),
        mode: view.mode(),
        transition_ms: config.transition_ms,
        cells,
        sparklines,
        sparkline_stroke: config.sparkline_stroke.clone(),
        sparkline_stroke_width: config.sparkline_stroke_width,
        month_labels,
        year_labels,
        legend: legend(&colors, config),
    }
}

fn cell_shape(
    cell: &MatrixCell,
    x_scale: &BandScale<i32>,
    y_scale: &BandScale<u32>,
    colors: &ColorScale,
) -> Option<CellShape> {
    Some(CellShape {
        key: cell.key(),
        x: x_scale.position(&cell.year)?,
        y: y_scale.position(&cell.month)?,
        width: x_scale.bandwidth(),
        height: y_scale.bandwidth(),
        fill_max: colors.color(value_for(DisplayMode::Maximum, cell)),
        fill_min: colors.color(value_for(DisplayMode::Minimum, cell)),
        tooltip: tooltip_html(cell),
    })
}

fn sparklines(
    cells: &[MatrixCell],
    daily: &DailyIndex,
    x_scale: &BandScale<i32>,
    y_scale: &BandScale<u32>,
    config: &HeatmapConfig,
) -> Vec<Sparkline> {
    let inset = config.sparkline_inset;
    let [cold, hot] = config.sparkline_domain;
    let y_spark = LinearScale::new((cold, hot), (y_scale.bandwidth() - inset, inset));

    cells
        .iter()
        .filter_map(|cell| {
            // A lookup miss means no sparkline for this cell.
            let days = daily.get(cell.year, cell.month)?;
            let origin = (x_scale.position(&cell.year)?, y_scale.position(&cell.month)?);
            let x_spark = LinearScale::new(
                (0.0, days.len().saturating_sub(1) as f64),
                (inset, x_scale.bandwidth() - inset),
            );

            let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
            let mut current: Vec<(f64, f64)> = Vec::new();
            for (i, day) in days.iter().enumerate() {
                if day.mean_temperature.is_finite() {
                    current.push((x_spark.apply(i as f64), y_spark.apply(day.mean_temperature)));
                } else if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            if !current.is_empty() {
                segments.push(current);
            }

            Some(Sparkline {
                key: cell.key(),
                origin,
                segments,
            })
        })
        .collect()
}

fn legend(colors: &ColorScale, config: &HeatmapConfig) -> Legend {
    let (lo, hi) = colors.domain;
    let height = config.inner_height();
    let last = config.legend_stops.saturating_sub(1).max(1) as f64;

    let stops = (0..config.legend_stops)
        .map(|i| {
            let fraction = i as f64 / last;
            LegendStop {
                offset: fraction * 100.0,
                color: colors.color(lo + fraction * (hi - lo)),
            }
        })
        .collect();

    let axis = LinearScale::new((lo, hi), (height, 0.0));
    let ticks = ticks(lo, hi, config.legend_ticks)
        .into_iter()
        .map(|value| LegendTick {
            y: axis.apply(value),
            label: format!("{}°C", value),
        })
        .collect();

    Legend {
        x: config.inner_width() + config.margin.left + config.legend_offset,
        y: config.margin.top,
        width: config.legend_width,
        height,
        domain: (lo, hi),
        stops,
        ticks,
    }
}
