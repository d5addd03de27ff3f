//! Top-level application orchestration.
//!
//! `src/main.rs` only maps the result to an exit code; this module:
//! - loads `.env` and parses CLI arguments
//! - sets up terminal logging
//! - runs the batch or Markstein pipeline
//! - prints reports

use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use crate::cli::{BatchArgs, Cli, Command, MarksteinArgs};
use crate::domain::{BatchConfig, MarksteinConfig, default_input_dir};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `stretch` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Batch(args) => handle_batch(&args),
        Command::Markstein(args) => handle_markstein(&args),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    // Fails only when another logger is already installed; that one keeps the output.
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).ok();
}

fn handle_batch(args: &BatchArgs) -> Result<(), AppError> {
    let config = batch_config_from_args(args);
    let out = pipeline::BatchRunner::new(config).run()?;

    for analysis in &out.analyses {
        println!("{}", crate::report::format_profile_report(analysis));
    }
    println!("{}", crate::report::format_summary_table(&out.table));

    Ok(())
}

fn handle_markstein(args: &MarksteinArgs) -> Result<(), AppError> {
    let config = markstein_config_from_args(args);
    let out = pipeline::run_markstein(&config)?;

    println!(
        "{}",
        crate::report::format_markstein_header(&out.fuel, &out.properties, config.threshold, out.table.len())
    );
    for fit in &out.fits {
        println!("{}", crate::report::format_fit_report(fit));
    }

    // Every regime is reported before a failure turns into the exit code.
    if let Some(Err(e)) = out.failed().next().map(|f| &f.result) {
        return Err(e.clone());
    }
    Ok(())
}

pub fn batch_config_from_args(args: &BatchArgs) -> BatchConfig {
    let defaults = BatchConfig::default();
    let fuel = args.fuel.trim().to_string();
    BatchConfig {
        phi: args.phi,
        input_dir: args
            .input_dir
            .clone()
            .unwrap_or_else(|| default_input_dir(&fuel, args.phi)),
        fuel,
        reference_species: args.reference.trim().to_string(),
        species: args
            .species
            .as_ref()
            .map(|list| list.iter().map(|s| s.trim().to_string()).collect())
            .unwrap_or(defaults.species),
        output_dir: args.output_dir.clone(),
        summary_name: args.summary_name.clone(),
        diagnostics: args.diagnostics,
        parallel: !args.sequential,
    }
}

pub fn markstein_config_from_args(args: &MarksteinArgs) -> MarksteinConfig {
    MarksteinConfig {
        phi: args.phi,
        summary_path: args.summary.clone(),
        threshold: args.threshold,
        properties: args.properties.clone(),
        export: args.export.clone(),
        line_points: args.line_points,
    }
}
