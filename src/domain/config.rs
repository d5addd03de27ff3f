//! Run configuration.
//!
//! Both configs are plain structs with validated defaults. The CLI builds them
//! from flags; library callers and tests can construct them directly.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Species written by the counter-flow solver runs this tool was built around.
pub const DEFAULT_SPECIES: [&str; 10] = [
    "CH4", "O2", "CO", "CO2", "H2O", "OH", "CH2O", "H2O2", "HO2", "HCO",
];

/// Profiles whose peak temperature stays below this are likely extinguished (K).
pub const EXTINCTION_TEMPERATURE: f64 = 500.0;

/// Prefix of the net production rate columns (`wdotCH4`, `wdotO2`, ...).
pub const PRODUCTION_RATE_PREFIX: &str = "wdot";

/// Configuration for one batch run over a directory of profiles.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Equivalence ratio of the batch (used for the default input directory and reporting).
    pub phi: f64,
    /// Species whose mass fraction and production rate define the consumption speed.
    pub fuel: String,
    /// Species whose production-rate minimum marks the reference plane.
    pub reference_species: String,
    /// Additional species that must be present in every profile.
    pub species: Vec<String>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Summary filename inside `output_dir`.
    pub summary_name: String,
    /// Also write per-profile diagnostic curves under `output_dir/diagnostics`.
    pub diagnostics: bool,
    /// Analyze profiles on the rayon pool. Output order is unaffected.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let phi = 1.0;
        let fuel = "CH4".to_string();
        Self {
            phi,
            input_dir: default_input_dir(&fuel, phi),
            fuel,
            reference_species: "O2".to_string(),
            species: DEFAULT_SPECIES.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("stretchResults"),
            summary_name: "results.csv".to_string(),
            diagnostics: false,
            parallel: true,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_phi(self.phi)?;
        if self.fuel.trim().is_empty() {
            return Err(AppError::invalid_config("Fuel species name must not be empty."));
        }
        if self.reference_species.trim().is_empty() {
            return Err(AppError::invalid_config("Reference species name must not be empty."));
        }
        if let Some(bad) = self.species.iter().find(|s| s.trim().is_empty()) {
            return Err(AppError::invalid_config(format!(
                "Species list contains an empty name ({bad:?})."
            )));
        }
        if self.summary_name.trim().is_empty() {
            return Err(AppError::invalid_config("Summary filename must not be empty."));
        }
        Ok(())
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_name)
    }

    pub fn diagnostics_dir(&self) -> PathBuf {
        self.output_dir.join("diagnostics")
    }

    /// Every species the loader must find: fuel, reference, then the extra list, deduplicated.
    pub fn required_species(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.species.len() + 2);
        for s in [&self.fuel, &self.reference_species].into_iter().chain(self.species.iter()) {
            let s = s.trim();
            if !out.iter().any(|known| known == s) {
                out.push(s.to_string());
            }
        }
        out
    }
}

/// Configuration for the Markstein fits over a summary table.
#[derive(Debug, Clone)]
pub struct MarksteinConfig {
    pub phi: f64,
    pub summary_path: PathBuf,
    /// Upper Karlovitz bound of the linear-stretch range.
    pub threshold: f64,
    /// JSON property table; `None` uses the built-in table.
    pub properties: Option<PathBuf>,
    /// Write all fits as JSON here.
    pub export: Option<PathBuf>,
    /// Number of samples in each fitted line.
    pub line_points: usize,
}

impl Default for MarksteinConfig {
    fn default() -> Self {
        Self {
            phi: 1.0,
            summary_path: PathBuf::from("stretchResults").join("results.csv"),
            threshold: 10.0,
            properties: None,
            export: None,
            line_points: 50,
        }
    }
}

impl MarksteinConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_phi(self.phi)?;
        if !self.threshold.is_finite() {
            return Err(AppError::invalid_config("Karlovitz threshold must be finite."));
        }
        if self.line_points < 2 {
            return Err(AppError::invalid_config("Fitted line needs at least 2 points."));
        }
        Ok(())
    }
}

/// `counterFlowResults/<fuel>/<phi with 2 decimals>`.
pub fn default_input_dir(fuel: &str, phi: f64) -> PathBuf {
    Path::new("counterFlowResults").join(fuel).join(format!("{phi:.2}"))
}

fn validate_phi(phi: f64) -> Result<(), AppError> {
    if !(phi.is_finite() && phi > 0.0) {
        return Err(AppError::invalid_config(format!(
            "Equivalence ratio must be finite and > 0 (got {phi})."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_validate() {
        let batch = BatchConfig::default();
        batch.validate().unwrap();
        assert_eq!(batch.input_dir, PathBuf::from("counterFlowResults/CH4/1.00"));
        assert_eq!(batch.summary_path(), PathBuf::from("stretchResults/results.csv"));
        MarksteinConfig::default().validate().unwrap();
    }

    #[test]
    fn required_species_are_deduplicated_in_order() {
        let config = BatchConfig {
            fuel: "H2".to_string(),
            reference_species: "O2".to_string(),
            species: vec!["O2".to_string(), "H2O".to_string(), "H2".to_string()],
            ..BatchConfig::default()
        };
        assert_eq!(config.required_species(), vec!["H2", "O2", "H2O"]);
    }

    #[test]
    fn bad_values_are_rejected() {
        let config = BatchConfig {
            phi: -1.0,
            ..BatchConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().kind(), ErrorKind::InvalidConfig);

        let config = MarksteinConfig {
            threshold: f64::NAN,
            ..MarksteinConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
