//! Formatted terminal output.
//!
//! Formatting lives here so the analysis and fitting code stays free of
//! presentation concerns; every function returns a `String` and the caller
//! decides where it goes.

use crate::analysis::ProfileAnalysis;
use crate::data::FlameProperties;
use crate::domain::{SummaryRow, SummaryTable};
use crate::fit::RegimeFit;

/// Per-profile block: pre-heat zone, reaction zone and the global consumption speed.
pub fn format_profile_report(analysis: &ProfileAnalysis) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== u = {} ===\n", analysis.label));
    out.push_str("** Pre-heat zone\n");
    out.push_str(&format!("   Flame speed: {}\n", fmt_num(analysis.preheat.flame_speed(), 3)));
    out.push_str(&format!("   Strain rate: {}\n", fmt_num(analysis.preheat.strain_rate(), 2)));
    out.push_str("** Reaction zone\n");
    out.push_str(&format!("   Flame speed: {}\n", fmt_num(analysis.reaction.flame_speed(), 3)));
    out.push_str(&format!("   Strain rate: {}\n", fmt_num(analysis.reaction.strain_rate(), 2)));
    out.push_str("** Global\n");
    out.push_str(&format!(
        "   Flame consumption speed: {}\n",
        fmt_num(analysis.consumption_speed, 3)
    ));

    out
}

/// The summary table as an aligned text table, one row per profile.
pub fn format_summary_table(table: &SummaryTable) -> String {
    let mut out = String::new();

    let h = SummaryTable::HEADER;
    out.push_str(&format!(
        "{:<10} {:>10} {:>12} {:>10} {:>12} {:>10}\n",
        h[0], h[1], h[2], h[3], h[4], h[5]
    ));
    out.push_str(&format!(
        "{:-<10} {:-<10} {:-<12} {:-<10} {:-<12} {:-<10}\n",
        "", "", "", "", "", ""
    ));
    for row in table.rows() {
        out.push_str(&format_summary_line(row));
        out.push('\n');
    }

    out
}

fn format_summary_line(row: &SummaryRow) -> String {
    format!(
        "{:<10} {:>10} {:>12} {:>10} {:>12} {:>10}",
        truncate(&row.label, 10),
        fmt_num(row.su, 4),
        fmt_num(row.ku, 2),
        fmt_num(row.su_b, 4),
        fmt_num(row.kb, 2),
        fmt_num(row.sc, 4),
    )
}

/// Header for a Markstein run: mixture properties and the stretch cut-off.
pub fn format_markstein_header(fuel: &str, props: &FlameProperties, threshold: f64, rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Markstein fits ({fuel}, phi = {:.2}) ===\n", props.phi));
    out.push_str(&format!(
        "D_th = {:.4e} m2/s | Sl_o = {:.4} m/s | delta_L = {:.4e} m\n",
        props.thermal_diffusivity,
        props.laminar_speed,
        props.flame_thickness()
    ));
    out.push_str(&format!("Rows: {rows} | Ka threshold: {threshold}\n"));
    out
}

/// One regime's fit, or the reason it could not be fitted.
pub fn format_fit_report(fit: &RegimeFit) -> String {
    let mut out = String::new();
    out.push_str(&format!("Markstein number: {}\n", fit.regime.display_name()));

    match &fit.result {
        Ok(f) => {
            out.push_str(&format!(
                "   regression: a={} b={}, ms error= {}\n",
                fmt_num(f.slope, 3),
                fmt_num(f.intercept, 3),
                fmt_num(f.rms_error, 3)
            ));
            out.push_str(&format!("   Ma = {}\n", fmt_num(f.markstein_number, 2)));
            out.push_str(&format!("   points used: {} | skipped: {}\n", f.points.len(), f.skipped));
        }
        Err(e) => {
            out.push_str(&format!("   not fitted: {e}\n"));
        }
    }

    out
}

fn fmt_num(v: f64, decimals: usize) -> String {
    if v.is_finite() {
        format!("{v:.decimals$}")
    } else {
        "NaN".to_string()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
