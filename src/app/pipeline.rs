//! Batch and Markstein pipelines shared by the CLI and library callers.
//!
//! Batch: list files -> drop boundary cases -> load every profile -> analyze
//! (optionally on the rayon pool) -> summary CSV (+ diagnostics).
//!
//! Markstein: property lookup -> read summary -> fit each regime -> optional JSON.
//!
//! Every profile is loaded before anything is analyzed or written, so a
//! malformed file leaves no partial summary behind.

use std::fs;

use rayon::prelude::*;

use crate::analysis::{ProfileAnalysis, analyze_profile};
use crate::data::{FlameProperties, PropertyTable};
use crate::domain::{BatchConfig, EXTINCTION_TEMPERATURE, FlameProfile, MarksteinConfig, SummaryTable};
use crate::error::AppError;
use crate::fit::{RegimeFit, fit_regimes};
use crate::io::{
    MarksteinExport, ProfileSchema, list_profile_files, load_profile, read_summary_csv, retained_cases,
    write_fits_json, write_profile_diagnostics_csv, write_summary_csv,
};

/// All computed outputs of one batch run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// One row per retained profile, in input order.
    pub table: SummaryTable,
    pub analyses: Vec<ProfileAnalysis>,
}

/// Runs the per-profile analysis over one input directory.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<BatchOutput, AppError> {
        let config = &self.config;
        config.validate()?;

        log::info!("Data source: {}", config.input_dir.display());
        log::info!("Path to save: {}", config.output_dir.display());

        let files = list_profile_files(&config.input_dir)?;
        let cases = retained_cases(&files)?;
        log::info!(
            "{} profile files found, analyzing {} (boundary cases dropped)",
            files.len(),
            cases.len()
        );

        let schema = ProfileSchema::from_config(config);
        let profiles = cases
            .iter()
            .map(|f| load_profile(f, &schema))
            .collect::<Result<Vec<FlameProfile>, AppError>>()?;

        let analyses = self.analyze_all(&profiles)?;

        for (profile, analysis) in profiles.iter().zip(&analyses) {
            for warning in profile_warnings(profile, analysis) {
                log::warn!("{warning}");
            }
        }

        let table: SummaryTable = analyses.iter().map(ProfileAnalysis::summary_row).collect();

        fs::create_dir_all(&config.output_dir).map_err(|e| {
            AppError::io(format!(
                "Failed to create output directory '{}': {e}",
                config.output_dir.display()
            ))
        })?;
        let summary_path = config.summary_path();
        write_summary_csv(&summary_path, &table)?;
        log::info!("Summary written to {} ({} rows)", summary_path.display(), table.len());

        if config.diagnostics {
            self.write_diagnostics(&profiles, &analyses)?;
        }

        Ok(BatchOutput { table, analyses })
    }

    fn analyze_all(&self, profiles: &[FlameProfile]) -> Result<Vec<ProfileAnalysis>, AppError> {
        let fuel = self.config.fuel.trim();
        if self.config.parallel {
            profiles.par_iter().map(|p| analyze_profile(p, fuel)).collect()
        } else {
            profiles.iter().map(|p| analyze_profile(p, fuel)).collect()
        }
    }

    fn write_diagnostics(&self, profiles: &[FlameProfile], analyses: &[ProfileAnalysis]) -> Result<(), AppError> {
        let dir = self.config.diagnostics_dir();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::io(format!("Failed to create diagnostics directory '{}': {e}", dir.display()))
        })?;
        for (profile, analysis) in profiles.iter().zip(analyses) {
            let path = dir.join(format!("{}.csv", profile.label));
            write_profile_diagnostics_csv(&path, profile, analysis)?;
        }
        log::info!("Diagnostics written to {}", dir.display());
        Ok(())
    }
}

/// Conditions worth a warning that still leave the profile's row in the table.
fn profile_warnings(profile: &FlameProfile, analysis: &ProfileAnalysis) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(peak) = profile.peak_temperature()
        && peak < EXTINCTION_TEMPERATURE
    {
        out.push(format!(
            "u = {}: peak temperature {peak:.0} K is below {EXTINCTION_TEMPERATURE:.0} K, flame is likely extinguished",
            profile.label
        ));
    }

    let degenerate = analysis.degenerate_fields();
    if !degenerate.is_empty() {
        out.push(format!("u = {}: undefined values for {}", profile.label, degenerate.join(", ")));
    }

    out
}

/// All computed outputs of one Markstein run.
#[derive(Debug, Clone)]
pub struct MarksteinOutput {
    pub fuel: String,
    pub properties: FlameProperties,
    pub table: SummaryTable,
    pub fits: Vec<RegimeFit>,
}

impl MarksteinOutput {
    pub fn failed(&self) -> impl Iterator<Item = &RegimeFit> {
        self.fits.iter().filter(|f| f.result.is_err())
    }
}

/// Fit the three regimes over a summary table.
///
/// The property lookup happens first; an unknown equivalence ratio stops the
/// run before anything is read. Per-regime failures are returned, not raised.
pub fn run_markstein(config: &MarksteinConfig) -> Result<MarksteinOutput, AppError> {
    config.validate()?;

    let table = match &config.properties {
        Some(path) => {
            log::info!("Property table: {}", path.display());
            PropertyTable::from_json_path(path)?
        }
        None => PropertyTable::builtin_methane(),
    };
    let properties = table.lookup(config.phi)?;
    log::debug!(
        "phi = {:.2}: D_th = {:e}, Sl_o = {}",
        properties.phi,
        properties.thermal_diffusivity,
        properties.laminar_speed
    );

    log::info!("Summary table: {}", config.summary_path.display());
    let summary = read_summary_csv(&config.summary_path)?;
    if summary.is_empty() {
        log::warn!("Summary table '{}' has no rows", config.summary_path.display());
    }

    let fits = fit_regimes(&summary, &properties, config.threshold, config.line_points);
    for fit in &fits {
        match &fit.result {
            Ok(f) if f.skipped > 0 => log::warn!(
                "{}: {} of {} points left out of the fit (Ka > {} cut or undefined values)",
                fit.regime.display_name(),
                f.skipped,
                summary.len(),
                config.threshold
            ),
            Ok(_) => {}
            Err(e) => log::warn!("{}: {e}", fit.regime.display_name()),
        }
    }

    let output = MarksteinOutput {
        fuel: table.fuel().to_string(),
        properties,
        table: summary,
        fits,
    };

    if let Some(path) = &config.export {
        let export = MarksteinExport::new(&output.fuel, output.properties, config.threshold, &output.fits);
        write_fits_json(path, &export)?;
        log::info!("Fits written to {}", path.display());
    }

    Ok(output)
}
