//! Profile discovery and CSV ingest.
//!
//! Each flame-solver run is one CSV file named after its inlet velocity
//! (`1.000`, `1.444`, ...). This module turns a directory of those files into
//! validated `FlameProfile`s.
//!
//! Design goals:
//! - **Strict schema**: a missing column or unparseable cell is fatal for the batch
//! - **Numeric ordering** of cases by the velocity in the filename, not lexical order
//! - **No analysis here**: only shape and ordering checks

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::domain::{BatchConfig, FlameProfile, PRODUCTION_RATE_PREFIX};
use crate::error::AppError;

/// A profile file found in the input directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFile {
    pub label: String,
    pub inlet_velocity: f64,
    pub path: PathBuf,
}

/// Column names the loader needs, resolved once per batch.
#[derive(Debug, Clone)]
pub struct ProfileSchema {
    pub reference_column: String,
    pub species: Vec<String>,
}

impl ProfileSchema {
    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            reference_column: production_rate_column(&config.reference_species),
            species: config.required_species(),
        }
    }
}

pub fn production_rate_column(species: &str) -> String {
    format!("{PRODUCTION_RATE_PREFIX}{}", species.trim())
}

/// List the profile files of `dir`, sorted by the numeric value of their names.
///
/// Subdirectories are ignored. Any regular file whose name is not a finite
/// number is an error: the batch cannot order it.
pub fn list_profile_files(dir: &Path) -> Result<Vec<ProfileFile>, AppError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        AppError::io(format!("Failed to read input directory '{}': {e}", dir.display()))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AppError::io(format!("Failed to list input directory '{}': {e}", dir.display()))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let label = entry.file_name().to_string_lossy().into_owned();
        let inlet_velocity = label
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                AppError::malformed(format!(
                    "Profile filename '{label}' in '{}' is not a numeric velocity label.",
                    dir.display()
                ))
            })?;

        files.push(ProfileFile {
            label,
            inlet_velocity,
            path,
        });
    }

    files.sort_by(|a, b| a.inlet_velocity.total_cmp(&b.inlet_velocity));
    Ok(files)
}

/// Drop the lowest- and highest-velocity cases.
///
/// The boundary runs of a velocity sweep are usually not converged or already
/// extinguished. Fewer than 3 files leaves nothing to analyze.
pub fn retained_cases(files: &[ProfileFile]) -> Result<&[ProfileFile], AppError> {
    if files.len() < 3 {
        return Err(AppError::insufficient(format!(
            "Need at least 3 profile files to drop the boundary cases (found {}).",
            files.len()
        )));
    }
    Ok(&files[1..files.len() - 1])
}

/// Load and validate one profile file.
pub fn load_profile(file: &ProfileFile, schema: &ProfileSchema) -> Result<FlameProfile, AppError> {
    let handle = File::open(&file.path).map_err(|e| {
        AppError::io(format!("Failed to open profile '{}': {e}", file.path.display()))
    })?;
    read_profile(handle, &file.label, schema)
}

/// Parse a profile table from any reader.
pub fn read_profile<R: Read>(
    reader: R,
    label: &str,
    schema: &ProfileSchema,
) -> Result<FlameProfile, AppError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::malformed(format!("Profile '{label}': failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let mut required: Vec<String> = vec!["x".into(), "velocity".into(), "rho".into()];
    let wanted = std::iter::once(schema.reference_column.clone()).chain(
        schema
            .species
            .iter()
            .flat_map(|s| [s.clone(), production_rate_column(s)]),
    );
    for name in wanted {
        if !required.contains(&name) {
            required.push(name);
        }
    }

    for name in &required {
        if !header_map.contains_key(name) {
            return Err(AppError::malformed(format!(
                "Profile '{label}': missing required column `{name}`."
            )));
        }
    }
    let has_temperature = header_map.contains_key("T");

    let mut columns: HashMap<&str, Vec<f64>> = required.iter().map(|n| (n.as_str(), Vec::new())).collect();
    let mut temperature = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: 1-based lines, header on line 1.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::malformed(format!("Profile '{label}' line {line}: CSV parse error: {e}")))?;

        for name in &required {
            let v = parse_cell(&record, &header_map, name)
                .map_err(|e| AppError::malformed(format!("Profile '{label}' line {line}: {e}")))?;
            if let Some(col) = columns.get_mut(name.as_str()) {
                col.push(v);
            }
        }
        if has_temperature {
            let v = parse_cell(&record, &header_map, "T")
                .map_err(|e| AppError::malformed(format!("Profile '{label}' line {line}: {e}")))?;
            temperature.push(v);
        }
    }

    let mut take = |name: &str| columns.remove(name).unwrap_or_default();

    let x = take("x");
    let velocity = take("velocity");
    let density = take("rho");
    let reference = take(&schema.reference_column);

    let mut mass_fractions = BTreeMap::new();
    let mut production_rates = BTreeMap::new();
    for species in &schema.species {
        let rate_column = production_rate_column(species);
        // The reference column may double as a species rate column; it was
        // already moved out above.
        let rate = if rate_column == schema.reference_column {
            reference.clone()
        } else {
            take(&rate_column)
        };
        mass_fractions.insert(species.clone(), take(species));
        production_rates.insert(species.clone(), rate);
    }

    validate_grid(label, &x)?;
    log::debug!("Profile '{label}': {} samples, {} species", x.len(), schema.species.len());

    Ok(FlameProfile {
        label: label.to_string(),
        x,
        velocity,
        density,
        reference,
        temperature: has_temperature.then_some(temperature),
        mass_fractions,
        production_rates,
    })
}

fn validate_grid(label: &str, x: &[f64]) -> Result<(), AppError> {
    if x.len() < 3 {
        return Err(AppError::malformed(format!(
            "Profile '{label}': needs at least 3 grid points (found {}).",
            x.len()
        )));
    }
    if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
        return Err(AppError::malformed(format!(
            "Profile '{label}': `x` is not strictly increasing at row {} ({} -> {}).",
            i + 2,
            x[i],
            x[i + 1]
        )));
    }
    Ok(())
}

pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Some tools emit UTF-8 CSVs with a BOM on the first header. Species
    // names are case-sensitive, so nothing else is normalized.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_cell(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<f64, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    let raw = record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing value in column `{name}`"))?;
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid number '{raw}' in column `{name}`"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite value '{raw}' in column `{name}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn schema() -> ProfileSchema {
        ProfileSchema {
            reference_column: "wdotO2".to_string(),
            species: vec!["CH4".to_string(), "O2".to_string()],
        }
    }

    const PROFILE: &str = "\
x,rho,T,velocity,CH4,O2,wdotCH4,wdotO2
0.0,1.0,300,10,0.05,0.22,0.0,0.0
1.0,1.0,320,9,0.05,0.22,-0.1,-1.0
2.0,0.5,1500,8,0.03,0.15,-0.4,-5.0
3.0,0.25,2000,7,0.01,0.05,-0.1,-2.0
";

    #[test]
    fn reads_required_and_optional_columns() {
        let profile = read_profile(PROFILE.as_bytes(), "1.500", &schema()).unwrap();
        assert_eq!(profile.len(), 4);
        assert_eq!(profile.velocity, vec![10.0, 9.0, 8.0, 7.0]);
        assert_eq!(profile.reference, vec![0.0, -1.0, -5.0, -2.0]);
        assert_eq!(profile.mass_fraction("CH4").unwrap()[2], 0.03);
        assert_eq!(profile.production_rate("O2").unwrap(), profile.reference.as_slice());
        assert_eq!(profile.peak_temperature(), Some(2000.0));
    }

    #[test]
    fn missing_column_is_malformed() {
        let csv = "x,rho,velocity,CH4,wdotCH4,O2\n0,1,1,0.1,0,0.2\n";
        let err = read_profile(csv.as_bytes(), "2.0", &schema()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.message().contains("wdotO2"));
    }

    #[test]
    fn bad_cell_reports_line_and_column() {
        let csv = PROFILE.replace("0.5,1500,8", "0.5,1500,fast");
        let err = read_profile(csv.as_bytes(), "2.0", &schema()).unwrap_err();
        assert!(err.message().contains("line 4"), "{err}");
        assert!(err.message().contains("`velocity`"), "{err}");
    }

    #[test]
    fn non_increasing_grid_is_rejected() {
        let csv = PROFILE.replace("2.0,0.5", "0.5,0.5");
        let err = read_profile(csv.as_bytes(), "2.0", &schema()).unwrap_err();
        assert!(err.message().contains("strictly increasing"));

        // A repeated coordinate is rejected too.
        let csv = PROFILE.replace("2.0,0.5", "1.0,0.5");
        let err = read_profile(csv.as_bytes(), "2.0", &schema()).unwrap_err();
        assert!(err.message().contains("row 3"));
    }

    #[test]
    fn files_sort_numerically_and_boundaries_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10.000", "2.000", "1.000", "1.500"] {
            fs::write(dir.path().join(name), "x\n").unwrap();
        }
        fs::create_dir(dir.path().join("diagnostics")).unwrap();

        let files = list_profile_files(dir.path()).unwrap();
        let labels: Vec<&str> = files.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["1.000", "1.500", "2.000", "10.000"]);

        let kept = retained_cases(&files).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].label, "1.500");
        assert_eq!(kept[1].label, "2.000");
    }

    #[test]
    fn too_few_files_is_insufficient() {
        let files = vec![
            ProfileFile {
                label: "1.0".into(),
                inlet_velocity: 1.0,
                path: PathBuf::from("1.0"),
            };
            2
        ];
        assert_eq!(retained_cases(&files).unwrap_err().kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn non_numeric_filename_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.0"), "x\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let err = list_profile_files(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }
}
