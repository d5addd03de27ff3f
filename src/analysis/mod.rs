//! Per-profile flame-speed and stretch-rate extraction.
//!
//! - `preheat`: strain-rate peak upstream of the flame and the extrapolated speed `Su`
//! - `reaction`: burnt-side stretch `Kb` and displacement speed at the reference plane
//! - `consumption`: integral consumption speed `Sc`
//!
//! Each analyzer is a pure function of the profile columns. Undefined results
//! (empty search ranges, zero denominators) come back as NaN; the batch decides
//! what to report.

use crate::domain::{FlameProfile, SummaryRow};
use crate::error::AppError;
use crate::math::argmin;

pub mod consumption;
pub mod preheat;
pub mod reaction;

pub use consumption::*;
pub use preheat::*;
pub use reaction::*;

/// The four aligned columns both zone analyzers work on.
#[derive(Debug, Clone, Copy)]
pub struct ZoneInputs<'a> {
    pub reference: &'a [f64],
    pub x: &'a [f64],
    pub velocity: &'a [f64],
    pub density: &'a [f64],
}

impl<'a> ZoneInputs<'a> {
    /// Bundle the columns, checking they line up and hold at least 3 samples.
    pub fn new(
        reference: &'a [f64],
        x: &'a [f64],
        velocity: &'a [f64],
        density: &'a [f64],
    ) -> Result<Self, AppError> {
        let n = x.len();
        if reference.len() != n || velocity.len() != n || density.len() != n {
            return Err(AppError::malformed(format!(
                "Profile columns differ in length (x={n}, reference={}, velocity={}, rho={}).",
                reference.len(),
                velocity.len(),
                density.len()
            )));
        }
        if n < 3 {
            return Err(AppError::malformed(format!(
                "Profile needs at least 3 samples (got {n})."
            )));
        }
        Ok(Self {
            reference,
            x,
            velocity,
            density,
        })
    }

    pub fn from_profile(profile: &'a FlameProfile) -> Result<Self, AppError> {
        Self::new(&profile.reference, &profile.x, &profile.velocity, &profile.density)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Index of the most negative reference value (the reaction-rate peak).
    pub fn reference_point(&self) -> usize {
        // `new` guarantees a non-empty slice.
        argmin(self.reference).unwrap_or(0)
    }
}

/// Everything extracted from one profile.
#[derive(Debug, Clone)]
pub struct ProfileAnalysis {
    pub label: String,
    pub preheat: PreheatAnalysis,
    pub reaction: ReactionAnalysis,
    pub consumption_speed: f64,
}

impl ProfileAnalysis {
    pub fn summary_row(&self) -> SummaryRow {
        SummaryRow {
            label: self.label.clone(),
            su: self.preheat.flame_speed(),
            ku: self.preheat.strain_rate(),
            su_b: self.reaction.flame_speed(),
            kb: self.reaction.strain_rate(),
            sc: self.consumption_speed,
        }
    }

    /// Names of the summary values that came out NaN or infinite.
    pub fn degenerate_fields(&self) -> Vec<&'static str> {
        let row = self.summary_row();
        SUMMARY_FIELDS
            .iter()
            .zip(row.values())
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, _)| *name)
            .collect()
    }
}

const SUMMARY_FIELDS: [&str; 5] = ["Su", "Ku", "Su_b", "Kb", "Sc"];

/// Run all three analyzers on one profile.
///
/// Fails only when the profile lacks the fuel columns or has misaligned
/// columns; numerical degeneracy is carried as NaN.
pub fn analyze_profile(profile: &FlameProfile, fuel: &str) -> Result<ProfileAnalysis, AppError> {
    let inputs = ZoneInputs::from_profile(profile)?;

    let y = profile.mass_fraction(fuel).ok_or_else(|| {
        AppError::malformed(format!("Profile '{}' has no `{fuel}` column.", profile.label))
    })?;
    let wdot = profile.production_rate(fuel).ok_or_else(|| {
        AppError::malformed(format!(
            "Profile '{}' has no `{}{fuel}` column.",
            profile.label,
            crate::domain::PRODUCTION_RATE_PREFIX
        ))
    })?;

    Ok(ProfileAnalysis {
        label: profile.label.clone(),
        preheat: analyze_preheat(&inputs),
        reaction: analyze_reaction(&inputs),
        consumption_speed: consumption_speed(&profile.x, &profile.density, y, wdot)?,
    })
}
