//! Command implementations for the tmx CLI.
//!
//! Renders the temperature matrix to a static site, serves that site, and
//! exports the matrix cells as CSV.

use clap::Subcommand;
use std::{net::IpAddr, path::PathBuf};
use tmx_chart::DisplayMode;
use tmx_core::RowPolicy;
use tmx_data::DEFAULT_WINDOW_YEARS;

pub mod matrix;
pub mod render;
pub mod serve;

#[derive(Subcommand)]
pub enum Command {
    /// Render the heatmap page, script and stylesheet into a directory
    Render {
        /// Daily temperature CSV (date,max_temperature,min_temperature)
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output directory for index.html, heatmap.js and heatmap.css
        #[arg(short = 'o', long, default_value = "site")]
        output_dir: PathBuf,

        /// JSON chart configuration; unset keys keep their defaults
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Initial display mode (max or min), overriding the configuration
        #[arg(short = 'm', long)]
        mode: Option<DisplayMode>,

        /// How malformed rows are handled (propagate, skip or strict)
        #[arg(long, default_value_t = RowPolicy::default())]
        policy: RowPolicy,

        /// Number of calendar years kept, ending at the latest year present
        #[arg(long, default_value_t = DEFAULT_WINDOW_YEARS)]
        years: u32,
    },

    /// Serve a rendered directory over HTTP
    Serve {
        /// Directory to serve; `/` maps to its index.html
        #[arg(short = 'r', long, default_value = "site")]
        root: PathBuf,

        #[arg(long, default_value = tmx_server::DEFAULT_HOST)]
        host: IpAddr,

        #[arg(short = 'p', long, default_value_t = tmx_server::DEFAULT_PORT)]
        port: u16,
    },

    /// Export the sorted matrix cells as CSV
    Matrix {
        /// Daily temperature CSV (date,max_temperature,min_temperature)
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output CSV path; stdout when omitted
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// How malformed rows are handled (propagate, skip or strict)
        #[arg(long, default_value_t = RowPolicy::default())]
        policy: RowPolicy,

        /// Number of calendar years kept, ending at the latest year present
        #[arg(long, default_value_t = DEFAULT_WINDOW_YEARS)]
        years: u32,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            input,
            output_dir,
            config,
            mode,
            policy,
            years,
        } => render::run_render(&input, &output_dir, config.as_deref(), mode, policy, years),
        Command::Serve { root, host, port } => serve::run_serve(root, host, port).await,
        Command::Matrix {
            input,
            output,
            policy,
            years,
        } => matrix::run_matrix(&input, output.as_deref(), policy, years),
    }
}
