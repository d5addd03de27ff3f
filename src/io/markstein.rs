//! Write Markstein fits as JSON.
//!
//! One file holds every regime of a run, the properties used to normalize
//! them and the regimes that could not be fitted. Non-finite numbers are
//! written as `null` (serde_json has no NaN).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::data::FlameProperties;
use crate::domain::{MarksteinFit, Regime};
use crate::error::AppError;
use crate::fit::RegimeFit;

#[derive(Debug, Clone, Serialize)]
pub struct MarksteinExport {
    pub tool: String,
    pub generated_at: DateTime<Local>,
    pub fuel: String,
    pub properties: FlameProperties,
    pub threshold: f64,
    pub fits: Vec<MarksteinFit>,
    pub failures: Vec<RegimeFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegimeFailure {
    pub regime: Regime,
    pub message: String,
}

impl MarksteinExport {
    pub fn new(fuel: &str, properties: FlameProperties, threshold: f64, results: &[RegimeFit]) -> Self {
        let mut fits = Vec::new();
        let mut failures = Vec::new();
        for r in results {
            match &r.result {
                Ok(fit) => fits.push(fit.clone()),
                Err(e) => failures.push(RegimeFailure {
                    regime: r.regime,
                    message: e.message().to_string(),
                }),
            }
        }

        Self {
            tool: "stretch".to_string(),
            generated_at: Local::now(),
            fuel: fuel.to_string(),
            properties,
            threshold,
            fits,
            failures,
        }
    }
}

pub fn write_fits_json(path: &Path, export: &MarksteinExport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create fit JSON '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut out, export)
        .map_err(|e| AppError::io(format!("Failed to write fit JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush fit JSON '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitLine, FitPoint};

    fn props() -> FlameProperties {
        FlameProperties {
            phi: 0.8,
            thermal_diffusivity: 2.0e-5,
            laminar_speed: 0.3,
        }
    }

    fn fit() -> MarksteinFit {
        MarksteinFit {
            regime: Regime::BurntGas,
            points: vec![FitPoint { ka: 0.1, speed: 0.9 }, FitPoint { ka: 0.2, speed: 0.8 }],
            skipped: 1,
            slope: -1.0,
            intercept: 1.0,
            rms_error: 0.0,
            markstein_number: 1.0,
            line: FitLine {
                ka: vec![0.1, 0.2],
                speed: vec![0.9, 0.8],
            },
        }
    }

    #[test]
    fn export_separates_fits_from_failures() {
        let results = vec![
            RegimeFit {
                regime: Regime::BurntGas,
                result: Ok(fit()),
            },
            RegimeFit {
                regime: Regime::UnburntGas,
                result: Err(AppError::insufficient("only 1 point")),
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fits.json");
        let export = MarksteinExport::new("CH4", props(), 10.0, &results);
        write_fits_json(&path, &export).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(v["tool"], "stretch");
        assert_eq!(v["fuel"], "CH4");
        assert_eq!(v["properties"]["Sl_o"], 0.3);
        assert_eq!(v["fits"].as_array().unwrap().len(), 1);
        assert_eq!(v["fits"][0]["regime"], "burnt-gas");
        assert_eq!(v["fits"][0]["markstein_number"], 1.0);
        assert_eq!(v["failures"][0]["regime"], "unburnt-gas");
        assert_eq!(v["failures"][0]["message"], "only 1 point");
        assert!(v["generated_at"].is_string());
    }

    #[test]
    fn nan_is_written_as_null() {
        let mut degenerate = fit();
        degenerate.slope = f64::NAN;
        let results = vec![RegimeFit {
            regime: Regime::BurntGas,
            result: Ok(degenerate),
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fits.json");
        write_fits_json(&path, &MarksteinExport::new("CH4", props(), 10.0, &results)).unwrap();

        let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(v["fits"][0]["slope"].is_null());
    }
}
