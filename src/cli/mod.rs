//! Command-line parsing for the flame-stretch tool.
//!
//! Argument parsing and command dispatch stay separate from the analysis
//! code; `app` turns these structs into `BatchConfig` / `MarksteinConfig`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "stretch",
    version,
    about = "Flame speed and stretch extraction from counter-flow premixed flame profiles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a directory of profiles and write the summary table.
    Batch(BatchArgs),
    /// Fit Markstein numbers over a summary table.
    Markstein(MarksteinArgs),
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Equivalence ratio of the batch.
    #[arg(long, default_value_t = 1.0)]
    pub phi: f64,

    /// Fuel species (mass fraction and `wdot` column used for the consumption speed).
    #[arg(long, default_value = "CH4")]
    pub fuel: String,

    /// Species whose `wdot` minimum marks the reference plane.
    #[arg(long, default_value = "O2")]
    pub reference: String,

    /// Species every profile must carry (comma separated). Defaults to the full solver set.
    #[arg(long, value_delimiter = ',')]
    pub species: Option<Vec<String>>,

    /// Directory of profile files. Defaults to `counterFlowResults/<fuel>/<phi>`.
    #[arg(long = "input", env = "STRETCH_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output directory for the summary (and diagnostics).
    #[arg(long = "output", env = "STRETCH_OUTPUT_DIR", default_value = "stretchResults")]
    pub output_dir: PathBuf,

    /// Summary filename inside the output directory.
    #[arg(long = "summary", default_value = "results.csv")]
    pub summary_name: String,

    /// Also write per-profile diagnostic curves.
    #[arg(long)]
    pub diagnostics: bool,

    /// Analyze profiles on a single thread.
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Debug, Args, Clone)]
pub struct MarksteinArgs {
    /// Equivalence ratio used for the property lookup.
    #[arg(long, default_value_t = 1.0)]
    pub phi: f64,

    /// Summary table written by `stretch batch`.
    #[arg(long, env = "STRETCH_SUMMARY", default_value = "stretchResults/results.csv")]
    pub summary: PathBuf,

    /// Upper Karlovitz bound of the linear-stretch range.
    #[arg(long, default_value_t = 10.0)]
    pub threshold: f64,

    /// JSON property table (`{"fuel", "entries": [{"phi", "D_th", "Sl_o"}]}`).
    #[arg(long, value_name = "JSON")]
    pub properties: Option<PathBuf>,

    /// Export all fits to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Samples per fitted line in the export.
    #[arg(long, default_value_t = crate::fit::DEFAULT_LINE_POINTS)]
    pub line_points: usize,
}
