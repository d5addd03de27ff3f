//! Regime series built from a summary table.
//!
//! With `δ_L = D_th / Sl_o`:
//!
//! | regime            | Ka            | normalized speed |
//! |-------------------|---------------|------------------|
//! | burnt gas         | `Kb δ_L/Sl_o` | `Su_b/Sl_o`      |
//! | unburnt gas       | `Ku δ_L/Sl_o` | `Su/Sl_o`        |
//! | consumption speed | `Kb δ_L/Sl_o` | `Sc/Sl_o`        |

use crate::data::FlameProperties;
use crate::domain::{MarksteinFit, Regime, SummaryRow, SummaryTable};
use crate::error::AppError;
use crate::fit::markstein::fit_markstein;

/// Normalized `(Ka, S/Sl_o)` series for one regime, in summary-table order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeSeries {
    pub regime: Regime,
    pub ka: Vec<f64>,
    pub speed: Vec<f64>,
}

/// Outcome of one regime's fit. A failed regime does not affect the others.
#[derive(Debug, Clone)]
pub struct RegimeFit {
    pub regime: Regime,
    pub result: Result<MarksteinFit, AppError>,
}

pub fn build_series(table: &SummaryTable, props: &FlameProperties, regime: Regime) -> RegimeSeries {
    let pick = |r: &SummaryRow| match regime {
        Regime::BurntGas => (r.kb, r.su_b),
        Regime::UnburntGas => (r.ku, r.su),
        Regime::ConsumptionSpeed => (r.kb, r.sc),
    };

    let (ka, speed) = table
        .rows()
        .iter()
        .map(|r| {
            let (stretch, speed) = pick(r);
            (props.karlovitz(stretch), props.normalized_speed(speed))
        })
        .unzip();

    RegimeSeries { regime, ka, speed }
}

/// Fit every regime in `Regime::ALL` order.
pub fn fit_regimes(
    table: &SummaryTable,
    props: &FlameProperties,
    threshold: f64,
    line_points: usize,
) -> Vec<RegimeFit> {
    Regime::ALL
        .iter()
        .map(|&regime| {
            let series = build_series(table, props, regime);
            RegimeFit {
                regime,
                result: fit_markstein(regime, &series.ka, &series.speed, threshold, line_points),
            }
        })
        .collect()
}
