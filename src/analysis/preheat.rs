//! Pre-heat zone: characteristic strain rate and extrapolated flame speed.
//!
//! Approaching the stagnation plane the axial velocity first falls roughly
//! linearly (the strained, non-reacting inflow) and then rises as the gas
//! expands through the flame. The characteristic strain rate `Ku` is the
//! steepest velocity gradient *upstream* of the velocity minimum; the flame
//! speed `Su` extrapolates that linear inflow to the reference plane:
//!
//! ```text
//! Su = u[sp] - Ku * (x[ref] - x[sp])
//! ```

use crate::analysis::ZoneInputs;
use crate::domain::CharacteristicPoint;
use crate::math::{argmax_abs, argmin, gradient};

/// Pre-heat zone result for one profile.
///
/// When the reference plane lies upstream of the strain point there is no
/// extrapolation to sample, so `Su` is NaN. `Ku` is still reported since the
/// strain point itself was found; it is not blanked along with `Su`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreheatAnalysis {
    pub reference_point: usize,
    /// `du/dx` over the whole profile.
    pub strain_field: Vec<f64>,
    /// Extrapolated inflow velocity, defined from the strain point onwards (NaN before it).
    pub extrapolation: Vec<f64>,
    pub point: CharacteristicPoint,
}

impl PreheatAnalysis {
    /// `Ku`: magnitude of the velocity gradient at the strain point.
    pub fn strain_rate(&self) -> f64 {
        self.point.strain_rate
    }

    /// `Su`: extrapolated inflow speed at the reference plane.
    pub fn flame_speed(&self) -> f64 {
        self.point.flame_speed
    }
}

pub fn analyze_preheat(inputs: &ZoneInputs<'_>) -> PreheatAnalysis {
    let n = inputs.len();
    let reference_point = inputs.reference_point();
    let strain_field = gradient(inputs.velocity, inputs.x).unwrap_or_else(|| vec![f64::NAN; n]);

    let undefined = |strain_field: Vec<f64>| PreheatAnalysis {
        reference_point,
        strain_field,
        extrapolation: vec![f64::NAN; n],
        point: CharacteristicPoint::undefined(),
    };

    let Some(strain_point) = locate_strain_point(inputs.velocity, &strain_field) else {
        return undefined(strain_field);
    };

    let ku = strain_field[strain_point].abs();
    let u0 = inputs.velocity[strain_point];
    let x0 = inputs.x[strain_point];

    let extrapolation: Vec<f64> = inputs
        .x
        .iter()
        .enumerate()
        .map(|(j, &xj)| if j >= strain_point { u0 - ku * (xj - x0) } else { f64::NAN })
        .collect();

    // The extrapolation only exists downstream of the strain point; a reference
    // plane upstream of it leaves Su undefined while Ku stays meaningful.
    let su = if reference_point >= strain_point {
        extrapolation[reference_point]
    } else {
        f64::NAN
    };

    PreheatAnalysis {
        reference_point,
        strain_field,
        extrapolation,
        point: CharacteristicPoint {
            index: Some(strain_point),
            strain_rate: ku,
            flame_speed: su,
        },
    }
}

/// Steepest gradient upstream of the velocity minimum that precedes the global strain peak.
///
/// `None` when either restricted range is empty.
fn locate_strain_point(velocity: &[f64], strain_field: &[f64]) -> Option<usize> {
    let max_strain = argmax_abs(strain_field)?;
    let min_velocity = argmin(&velocity[..max_strain])?;
    argmax_abs(&strain_field[..min_velocity])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::simple_profile;

    fn run(reference: &[f64], x: &[f64], velocity: &[f64]) -> PreheatAnalysis {
        let density = vec![1.0; x.len()];
        let inputs = ZoneInputs::new(reference, x, velocity, &density).unwrap();
        analyze_preheat(&inputs)
    }

    #[test]
    fn strain_point_precedes_velocity_minimum() {
        let profile = simple_profile("1.0");
        let inputs = ZoneInputs::from_profile(&profile).unwrap();
        let out = analyze_preheat(&inputs);

        assert_eq!(out.reference_point, 2);
        assert_eq!(out.point.index, Some(0));
        assert!((out.strain_rate() - 1.0).abs() < 1e-12);
        assert!((out.flame_speed() - 8.0).abs() < 1e-12);
        assert!(out.extrapolation.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn linear_inflow_extrapolates_exactly() {
        // u = 10 - x on the inflow side; reference plane at x = 0.
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let velocity = [10.0, 9.0, 8.0, 7.0, 12.0, 30.0];
        let reference = [-3.0, -1.0, 0.0, 0.0, 0.0, 0.0];
        let out = run(&reference, &x, &velocity);
        assert_eq!(out.reference_point, 0);
        assert!((out.flame_speed() - 10.0).abs() < 1e-12);

        // Any reference point on the linear stretch reproduces the local velocity.
        let reference = [0.0, 0.0, -3.0, 0.0, 0.0, 0.0];
        let out = run(&reference, &x, &velocity);
        assert!((out.flame_speed() - velocity[2]).abs() < 1e-12);
    }

    #[test]
    fn strain_rate_is_never_negative() {
        let x = [0.0, 0.1, 0.3, 0.4, 0.45, 0.6, 0.8];
        let velocity = [2.0, 1.9, 1.5, 1.35, 1.3, 2.5, 4.0];
        let reference = [0.0, 0.0, 0.0, -1.0, -4.0, -1.0, 0.0];
        let out = run(&reference, &x, &velocity);
        assert!(out.strain_rate() >= 0.0);
        assert!(out.flame_speed().is_finite());
    }

    #[test]
    fn empty_search_range_is_nan_not_panic() {
        // Steepest gradient at index 0: nothing upstream of it to search.
        let x = [0.0, 1.0, 2.0, 3.0];
        let velocity = [10.0, 0.0, 1.0, 2.0];
        let out = run(&[0.0, -1.0, 0.0, 0.0], &x, &velocity);
        assert!(out.strain_rate().is_nan());
        assert!(out.flame_speed().is_nan());
        assert_eq!(out.point.index, None);

        // Velocity minimum at index 0: empty strain search.
        let velocity = [1.0, 2.0, 3.0, 10.0];
        let out = run(&[0.0, -1.0, 0.0, 0.0], &x, &velocity);
        assert!(out.point.index.is_none());
    }

    #[test]
    fn reference_upstream_of_strain_point_leaves_speed_undefined() {
        // Strain point lands at index 2, reference plane at index 0.
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let velocity = [10.0, 9.8, 7.8, 6.0, 5.0, 9.0, 30.0];
        let reference = [-9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let out = run(&reference, &x, &velocity);
        assert_eq!(out.point.index, Some(2));
        assert!(out.flame_speed().is_nan());
        assert!(out.strain_rate().is_finite());
    }

    #[test]
    fn repeated_calls_agree() {
        let profile = simple_profile("2.0");
        let inputs = ZoneInputs::from_profile(&profile).unwrap();
        assert_eq!(analyze_preheat(&inputs), analyze_preheat(&inputs));
    }
}
