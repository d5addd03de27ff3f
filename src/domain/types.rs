//! Shared domain types.
//!
//! Profiles are loaded whole and never mutated; every derived quantity lives in
//! a separate result record so analysis order does not matter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One simulation run's 1-D spatial sample.
///
/// All sequences share the length of `x` and are aligned by index.
/// `ingest` guarantees `x` is strictly increasing and has at least 3 samples.
#[derive(Debug, Clone)]
pub struct FlameProfile {
    /// Case label as it appears in the filename (e.g. `"1.444"`).
    pub label: String,

    pub x: Vec<f64>,
    pub velocity: Vec<f64>,
    pub density: Vec<f64>,
    /// Reference scalar used to locate the reaction plane (most negative value).
    pub reference: Vec<f64>,
    pub temperature: Option<Vec<f64>>,

    /// Mass fractions keyed by species name.
    pub mass_fractions: BTreeMap<String, Vec<f64>>,
    /// Net mass production rates keyed by species name (`wdot<species>` columns).
    pub production_rates: BTreeMap<String, Vec<f64>>,
}

impl FlameProfile {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn mass_fraction(&self, species: &str) -> Option<&[f64]> {
        self.mass_fractions.get(species).map(Vec::as_slice)
    }

    pub fn production_rate(&self, species: &str) -> Option<&[f64]> {
        self.production_rates.get(species).map(Vec::as_slice)
    }

    pub fn peak_temperature(&self) -> Option<f64> {
        self.temperature
            .as_ref()
            .map(|t| t.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }
}

/// Where a zone's characteristic strain rate was sampled, and what was found there.
///
/// `index` is `None` when the search range was empty; both scalars are NaN then.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicPoint {
    pub index: Option<usize>,
    pub strain_rate: f64,
    pub flame_speed: f64,
}

impl CharacteristicPoint {
    pub fn undefined() -> Self {
        Self {
            index: None,
            strain_rate: f64::NAN,
            flame_speed: f64::NAN,
        }
    }
}

/// One summary line per analyzed profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Velocity label (`u` column), kept as text.
    pub label: String,
    /// Pre-heat zone flame speed.
    pub su: f64,
    /// Pre-heat zone strain rate.
    pub ku: f64,
    /// Reaction zone (burnt side) displacement speed.
    pub su_b: f64,
    /// Reaction zone strain rate.
    pub kb: f64,
    /// Consumption speed.
    pub sc: f64,
}

impl SummaryRow {
    pub fn values(&self) -> [f64; 5] {
        [self.su, self.ku, self.su_b, self.kb, self.sc]
    }
}

/// Ordered summary rows; insertion order is input file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub const HEADER: [&'static str; 6] = ["u", "Su", "Ku", "Su_b", "Kb", "Sc"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: SummaryRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<SummaryRow> for SummaryTable {
    fn from_iter<I: IntoIterator<Item = SummaryRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Which flame-speed definition a Markstein fit is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regime {
    /// Density-weighted displacement speed against reaction-zone stretch.
    BurntGas,
    /// Extrapolated pre-heat speed against pre-heat stretch.
    UnburntGas,
    /// Consumption speed against reaction-zone stretch.
    ConsumptionSpeed,
}

impl Regime {
    pub const ALL: [Regime; 3] = [Regime::BurntGas, Regime::UnburntGas, Regime::ConsumptionSpeed];

    pub fn display_name(self) -> &'static str {
        match self {
            Regime::BurntGas => "Burnt gas",
            Regime::UnburntGas => "Unburnt gas",
            Regime::ConsumptionSpeed => "Consumption speed",
        }
    }
}

/// A `(Ka, S/Sl_o)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitPoint {
    pub ka: f64,
    pub speed: f64,
}

/// Densely sampled fitted line, for plotting or tabulating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitLine {
    pub ka: Vec<f64>,
    pub speed: Vec<f64>,
}

/// Linear Markstein fit for one regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarksteinFit {
    pub regime: Regime,
    /// Pairs that survived the threshold prefix scan, in input order.
    pub points: Vec<FitPoint>,
    /// Input pairs not used (after the first threshold exceedance, or non-finite).
    pub skipped: usize,
    pub slope: f64,
    pub intercept: f64,
    pub rms_error: f64,
    /// `-slope`.
    pub markstein_number: f64,
    pub line: FitLine,
}

impl MarksteinFit {
    /// Fitted normalized speed at a given Karlovitz number.
    pub fn predict(&self, ka: f64) -> f64 {
        self.slope * ka + self.intercept
    }
}
