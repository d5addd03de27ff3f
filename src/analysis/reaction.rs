//! Reaction zone: burnt-side stretch and density-weighted displacement speed.
//!
//! Downstream of the reference plane the stretch is measured through the mass
//! flux divergence, `Kb = -(1/ρ) d(ρu)/dx`, sampled at the reference plane
//! itself. The last grid point is excluded; it sits on the symmetry plane.

use crate::analysis::ZoneInputs;
use crate::domain::CharacteristicPoint;
use crate::math::gradient;

/// Reaction zone result for one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionAnalysis {
    pub reference_point: usize,
    /// `ρu/ρ_b` over the whole profile.
    pub mass_flux_burnt: Vec<f64>,
    /// `-(1/ρ) d(ρu)/dx` over `[reference_point, N-1)`; empty when that range is too short.
    pub strain_field: Vec<f64>,
    pub point: CharacteristicPoint,
}

impl ReactionAnalysis {
    /// `Kb`: burnt-side stretch at the reference plane.
    pub fn strain_rate(&self) -> f64 {
        self.point.strain_rate
    }

    /// Density-weighted displacement speed at the reference plane.
    pub fn flame_speed(&self) -> f64 {
        self.point.flame_speed
    }
}

pub fn analyze_reaction(inputs: &ZoneInputs<'_>) -> ReactionAnalysis {
    let n = inputs.len();
    let reference_point = inputs.reference_point();
    let rho = inputs.density;
    let rho_u = rho[0];
    let rho_b = rho[n - 1];

    let mass_flux: Vec<f64> = rho.iter().zip(inputs.velocity).map(|(r, u)| r * u).collect();
    let mass_flux_burnt: Vec<f64> = mass_flux.iter().map(|m| m / rho_b).collect();

    let sub = reference_point..n - 1;
    let strain_field = gradient(&mass_flux[sub.clone()], &inputs.x[sub.clone()])
        .map(|grad| {
            grad.iter()
                .zip(&rho[sub])
                .map(|(g, r)| -g / r)
                .collect::<Vec<f64>>()
        })
        .unwrap_or_default();

    let kb = strain_field.first().copied().unwrap_or(f64::NAN);
    let displacement_speed = rho_b * mass_flux_burnt[reference_point] / rho_u;

    ReactionAnalysis {
        reference_point,
        mass_flux_burnt,
        strain_field,
        point: CharacteristicPoint {
            index: Some(reference_point),
            strain_rate: kb,
            flame_speed: displacement_speed,
        },
    }
}
