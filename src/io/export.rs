//! Summary table and per-profile diagnostics as CSV.
//!
//! The summary is meant to be easy to consume in spreadsheets or downstream
//! scripts, and is read back by the Markstein fit. Numbers are written with 6
//! decimals; undefined values are written as `NaN`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::ProfileAnalysis;
use crate::domain::{FlameProfile, SummaryRow, SummaryTable};
use crate::error::AppError;
use crate::io::ingest::build_header_map;

/// Write the summary table, replacing any existing file at `path`.
pub fn write_summary_csv(path: &Path, table: &SummaryTable) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create summary CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", SummaryTable::HEADER.join(","))
        .map_err(|e| AppError::io(format!("Failed to write summary CSV header: {e}")))?;

    for row in table.rows() {
        writeln!(
            out,
            "{},{:.6},{:.6},{:.6},{:.6},{:.6}",
            row.label, row.su, row.ku, row.su_b, row.kb, row.sc
        )
        .map_err(|e| AppError::io(format!("Failed to write summary CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush summary CSV '{}': {e}", path.display())))?;
    Ok(())
}

/// Read a summary table written by `write_summary_csv` (or any CSV with the same header).
///
/// Empty cells read as NaN, matching how spreadsheet tools export missing values.
pub fn read_summary_csv(path: &Path) -> Result<SummaryTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open summary CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| AppError::malformed(format!("Failed to read summary CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let mut idx = [0usize; 6];
    for (slot, name) in idx.iter_mut().zip(SummaryTable::HEADER) {
        *slot = *header_map.get(name).ok_or_else(|| {
            AppError::malformed(format!(
                "Summary CSV '{}' is missing column `{name}`.",
                path.display()
            ))
        })?;
    }

    let mut table = SummaryTable::new();
    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = result.map_err(|e| AppError::malformed(format!("Summary CSV line {line}: {e}")))?;

        let text = |col: usize| record.get(idx[col]).unwrap_or("").trim();
        let number = |col: usize| -> Result<f64, AppError> {
            let raw = text(col);
            if raw.is_empty() {
                return Ok(f64::NAN);
            }
            raw.parse::<f64>().map_err(|_| {
                AppError::malformed(format!(
                    "Summary CSV line {line}: invalid number '{raw}' in column `{}`.",
                    SummaryTable::HEADER[col]
                ))
            })
        };

        table.push(SummaryRow {
            label: text(0).to_string(),
            su: number(1)?,
            ku: number(2)?,
            su_b: number(3)?,
            kb: number(4)?,
            sc: number(5)?,
        });
    }

    Ok(table)
}

/// Write the curves behind one profile's numbers: velocity, strain field,
/// mass fluxes, pre-heat extrapolation and reaction-zone stretch.
///
/// Cells where a curve is undefined are left empty.
pub fn write_profile_diagnostics_csv(
    path: &Path,
    profile: &FlameProfile,
    analysis: &ProfileAnalysis,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create diagnostics CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "x,velocity,strain_u,mass_flux_u,mass_flux_b,s_extrap,kb")
        .map_err(|e| AppError::io(format!("Failed to write diagnostics header: {e}")))?;

    let rho_u = profile.density[0];
    let kb_start = analysis.reaction.reference_point;
    let kb_field = &analysis.reaction.strain_field;

    for i in 0..profile.len() {
        let kb = i
            .checked_sub(kb_start)
            .and_then(|j| kb_field.get(j))
            .copied()
            .unwrap_or(f64::NAN);
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            cell(profile.x[i]),
            cell(profile.velocity[i]),
            cell(analysis.preheat.strain_field[i]),
            cell(profile.density[i] * profile.velocity[i] / rho_u),
            cell(analysis.reaction.mass_flux_burnt[i]),
            cell(analysis.preheat.extrapolation[i]),
            cell(kb),
        )
        .map_err(|e| AppError::io(format!("Failed to write diagnostics row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush diagnostics CSV '{}': {e}", path.display())))?;
    Ok(())
}

fn cell(v: f64) -> String {
    if v.is_finite() { format!("{v:.6e}") } else { String::new() }
}
