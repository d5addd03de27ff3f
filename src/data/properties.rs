//! Unstretched flame properties keyed by equivalence ratio.
//!
//! Normalizing stretch into a Karlovitz number needs two reference values per
//! mixture: the unburnt thermal diffusivity `D_th` and the unstretched laminar
//! flame speed `Sl_o`. They come from a table keyed by equivalence ratio.
//!
//! Keys are quantized to one decimal (`round(phi * 10)`) on insert and on
//! lookup, so `0.7`, `0.70` and `0.7000000001` all hit the same entry.
//!
//! The JSON file format is:
//!
//! ```json
//! { "fuel": "CH4", "entries": [ { "phi": 1.0, "D_th": 2.16e-5, "Sl_o": 0.37 } ] }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Reference properties of one unstretched mixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlameProperties {
    pub phi: f64,
    /// Thermal diffusivity of the unburnt mixture (m²/s).
    #[serde(rename = "D_th")]
    pub thermal_diffusivity: f64,
    /// Unstretched laminar flame speed (m/s).
    #[serde(rename = "Sl_o")]
    pub laminar_speed: f64,
}

impl FlameProperties {
    /// Diffusive flame thickness `δ_L = D_th / Sl_o` (m).
    pub fn flame_thickness(&self) -> f64 {
        self.thermal_diffusivity / self.laminar_speed
    }

    /// Karlovitz number for a stretch rate `k` (1/s): `k δ_L / Sl_o`.
    pub fn karlovitz(&self, stretch: f64) -> f64 {
        stretch * self.flame_thickness() / self.laminar_speed
    }

    /// Flame speed normalized by `Sl_o`.
    pub fn normalized_speed(&self, speed: f64) -> f64 {
        speed / self.laminar_speed
    }

    fn validate(&self) -> Result<(), AppError> {
        let ok = self.phi.is_finite()
            && self.phi > 0.0
            && self.thermal_diffusivity.is_finite()
            && self.thermal_diffusivity > 0.0
            && self.laminar_speed.is_finite()
            && self.laminar_speed > 0.0;
        if !ok {
            return Err(AppError::malformed(format!(
                "Invalid property entry for phi={}: D_th and Sl_o must be finite and > 0.",
                self.phi
            )));
        }
        Ok(())
    }
}

/// Quantized equivalence-ratio key used by the property table.
pub fn phi_key(phi: f64) -> i64 {
    (phi * 10.0).round() as i64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PropertyFile {
    fuel: String,
    entries: Vec<FlameProperties>,
}

/// Property lookup table for one fuel.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    fuel: String,
    entries: BTreeMap<i64, FlameProperties>,
}

impl PropertyTable {
    pub fn new(fuel: impl Into<String>, entries: Vec<FlameProperties>) -> Result<Self, AppError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            entry.validate()?;
            if map.insert(phi_key(entry.phi), entry).is_some() {
                return Err(AppError::malformed(format!(
                    "Duplicate property entry for phi={:.1}.",
                    entry.phi
                )));
            }
        }
        Ok(Self {
            fuel: fuel.into(),
            entries: map,
        })
    }

    /// Approximate CH4/air values at 300 K and 1 atm (mixture-averaged transport).
    ///
    /// Good enough for quick looks; pass a measured or computed table for anything
    /// that gets published.
    pub fn builtin_methane() -> Self {
        const ROWS: [(f64, f64, f64); 8] = [
            (0.6, 2.20e-5, 0.120),
            (0.7, 2.19e-5, 0.190),
            (0.8, 2.18e-5, 0.260),
            (0.9, 2.17e-5, 0.330),
            (1.0, 2.16e-5, 0.370),
            (1.1, 2.15e-5, 0.385),
            (1.2, 2.14e-5, 0.320),
            (1.3, 2.13e-5, 0.220),
        ];
        let entries = ROWS
            .iter()
            .map(|&(phi, thermal_diffusivity, laminar_speed)| {
                (
                    phi_key(phi),
                    FlameProperties {
                        phi,
                        thermal_diffusivity,
                        laminar_speed,
                    },
                )
            })
            .collect();
        Self {
            fuel: "CH4".to_string(),
            entries,
        }
    }

    pub fn from_json_path(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::io(format!("Failed to open property table '{}': {e}", path.display()))
        })?;
        let parsed: PropertyFile = serde_json::from_reader(file).map_err(|e| {
            AppError::malformed(format!("Invalid property table '{}': {e}", path.display()))
        })?;
        Self::new(parsed.fuel, parsed.entries)
    }

    pub fn fuel(&self) -> &str {
        &self.fuel
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Properties for `phi`, after quantizing it to one decimal.
    pub fn lookup(&self, phi: f64) -> Result<FlameProperties, AppError> {
        if !phi.is_finite() {
            return Err(AppError::lookup(format!("Equivalence ratio {phi} is not finite.")));
        }
        self.entries.get(&phi_key(phi)).copied().ok_or_else(|| {
            let known: Vec<String> = self.entries.values().map(|e| format!("{:.1}", e.phi)).collect();
            AppError::lookup(format!(
                "No {} properties for phi={phi:.1} (available: {}).",
                self.fuel,
                known.join(", ")
            ))
        })
    }
}
