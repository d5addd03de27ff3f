//! Global consumption speed.
//!
//! ```text
//! Sc = |∫ wdot_F dx| / ((Y_F,u - Y_F,b) ρ_u)
//! ```
//!
//! `wdot_F` is the fuel's net mass production rate, `Y_F` its mass fraction.
//! When the fuel is not consumed across the domain (`Y_F,u == Y_F,b`) the
//! result is infinite or NaN; callers treat that as a degenerate value.

use crate::error::AppError;
use crate::math::trapezoid;

pub fn consumption_speed(
    x: &[f64],
    density: &[f64],
    mass_fraction: &[f64],
    production_rate: &[f64],
) -> Result<f64, AppError> {
    let n = x.len();
    if density.len() != n || mass_fraction.len() != n || production_rate.len() != n {
        return Err(AppError::malformed(format!(
            "Consumption speed columns differ in length (x={n}, rho={}, Y={}, wdot={}).",
            density.len(),
            mass_fraction.len(),
            production_rate.len()
        )));
    }
    if n < 2 {
        return Err(AppError::malformed("Consumption speed needs at least 2 samples."));
    }

    let integral = trapezoid(production_rate, x);
    let consumed = mass_fraction[0] - mass_fraction[n - 1];
    Ok(integral.abs() / consumed / density[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_hand_integration() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let rho = [1.0, 1.0, 0.5, 0.25, 0.2, 0.2];
        let y = [0.05, 0.05, 0.03, 0.01, 0.0, 0.0];
        let wdot = [0.0, -0.1, -0.4, -0.1, 0.0, 0.0];
        // ∫ wdot dx = -0.6
        let sc = consumption_speed(&x, &rho, &y, &wdot).unwrap();
        assert!((sc - 12.0).abs() < 1e-12);
    }

    #[test]
    fn zero_production_gives_zero_speed() {
        let x = [0.0, 0.1, 0.3];
        let sc = consumption_speed(&x, &[1.1, 0.9, 0.2], &[0.06, 0.02, 0.0], &[0.0; 3]).unwrap();
        assert_eq!(sc, 0.0);
    }

    #[test]
    fn no_net_consumption_is_degenerate() {
        let x = [0.0, 0.1, 0.3];
        let sc = consumption_speed(&x, &[1.0; 3], &[0.05, 0.01, 0.05], &[0.0, -1.0, 0.0]).unwrap();
        assert!(!sc.is_finite());

        let sc = consumption_speed(&x, &[1.0; 3], &[0.05, 0.01, 0.05], &[0.0; 3]).unwrap();
        assert!(sc.is_nan());
    }

    #[test]
    fn misaligned_columns_are_rejected() {
        assert!(consumption_speed(&[0.0, 1.0], &[1.0], &[0.1, 0.0], &[0.0, 0.0]).is_err());
    }
}
