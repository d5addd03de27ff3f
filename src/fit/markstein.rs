//! Linear Markstein fit for one regime.
//!
//! Close to the unstretched limit the normalized flame speed is linear in the
//! Karlovitz number, `S/Sl_o ≈ b - Ma Ka`. Only the low-stretch part of the
//! series belongs to that linear range, so the input is scanned from the start
//! and cut at the first point above the threshold. Points after that cut are
//! dropped even if they fall back under the threshold.

use crate::domain::{FitLine, FitPoint, MarksteinFit, Regime};
use crate::error::AppError;
use crate::math::{fit_line, linspace};

/// Number of samples in the reported fitted line.
pub const DEFAULT_LINE_POINTS: usize = 50;

/// Result of the threshold prefix scan.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixScan {
    pub points: Vec<FitPoint>,
    /// Non-finite pairs skipped before the cut.
    pub non_finite: usize,
    /// Index of the first pair above the threshold, if any.
    pub cut_at: Option<usize>,
}

/// Accumulate pairs from index 0 while `Ka <= threshold`.
///
/// Pairs with a NaN or infinite component are skipped without ending the scan,
/// except `Ka = +inf`, which exceeds any finite threshold.
pub fn prefix_scan(ka: &[f64], speed: &[f64], threshold: f64) -> PrefixScan {
    let mut points = Vec::new();
    let mut non_finite = 0usize;
    let mut cut_at = None;

    for (i, (&k, &s)) in ka.iter().zip(speed).enumerate() {
        if k > threshold {
            cut_at = Some(i);
            break;
        }
        if !(k.is_finite() && s.is_finite()) {
            non_finite += 1;
            continue;
        }
        points.push(FitPoint { ka: k, speed: s });
    }

    PrefixScan {
        points,
        non_finite,
        cut_at,
    }
}

/// Fit `S/Sl_o = a Ka + b` over the threshold prefix of a series.
///
/// Fewer than 2 usable points is an error for this regime only. When every
/// used point shares the same `Ka` the slope is undefined and the fit comes
/// back with NaN coefficients.
pub fn fit_markstein(
    regime: Regime,
    ka: &[f64],
    speed: &[f64],
    threshold: f64,
    line_points: usize,
) -> Result<MarksteinFit, AppError> {
    if ka.len() != speed.len() {
        return Err(AppError::malformed(format!(
            "{}: Ka and speed series differ in length ({} vs {}).",
            regime.display_name(),
            ka.len(),
            speed.len()
        )));
    }

    let scan = prefix_scan(ka, speed, threshold);
    let n = scan.points.len();
    if n < 2 {
        return Err(AppError::insufficient(format!(
            "{}: {n} point(s) with Ka <= {threshold} before the first exceedance; at least 2 are needed.",
            regime.display_name()
        )));
    }

    let x: Vec<f64> = scan.points.iter().map(|p| p.ka).collect();
    let y: Vec<f64> = scan.points.iter().map(|p| p.speed).collect();

    let (slope, intercept) = fit_line(&x, &y).unwrap_or((f64::NAN, f64::NAN));

    let sse: f64 = x
        .iter()
        .zip(&y)
        .map(|(xi, yi)| {
            let r = slope * xi + intercept - yi;
            r * r
        })
        .sum();
    let rms_error = (sse / n as f64).sqrt();

    let ka_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let ka_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let line_ka = linspace(ka_min, ka_max, line_points);
    let line_speed = line_ka.iter().map(|k| slope * k + intercept).collect();

    Ok(MarksteinFit {
        regime,
        points: scan.points,
        skipped: ka.len() - n,
        slope,
        intercept,
        rms_error,
        markstein_number: -slope,
        line: FitLine {
            ka: line_ka,
            speed: line_speed,
        },
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn exact_line_is_recovered() {
        let ka = [0.05, 0.1, 0.2, 0.3, 0.45];
        let speed: Vec<f64> = ka.iter().map(|k| 1.02 - 3.5 * k).collect();
        let fit = fit_markstein(Regime::BurntGas, &ka, &speed, 10.0, DEFAULT_LINE_POINTS).unwrap();

        assert_abs_diff_eq!(fit.slope, -3.5, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.intercept, 1.02, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.markstein_number, 3.5, epsilon = 1e-10);
        assert!(fit.rms_error < 1e-10);
        assert_eq!(fit.points.len(), 5);
        assert_eq!(fit.skipped, 0);
    }

    #[test]
    fn scan_stops_at_first_exceedance() {
        let ka = [1.0, 2.0, 11.0, 3.0];
        let speed = [0.9, 0.8, 0.1, 0.7];
        let fit = fit_markstein(Regime::UnburntGas, &ka, &speed, 10.0, DEFAULT_LINE_POINTS).unwrap();

        assert_eq!(
            fit.points,
            vec![FitPoint { ka: 1.0, speed: 0.9 }, FitPoint { ka: 2.0, speed: 0.8 }]
        );
        assert_eq!(fit.skipped, 2);
        assert_abs_diff_eq!(fit.markstein_number, 0.1, epsilon = 1e-10);
    }

    #[test]
    fn line_spans_used_range() {
        let ka = [0.3, 0.1, 0.2];
        let speed = [0.4, 0.8, 0.6];
        let fit = fit_markstein(Regime::ConsumptionSpeed, &ka, &speed, 1.0, 50).unwrap();

        assert_eq!(fit.line.ka.len(), 50);
        assert_eq!(fit.line.speed.len(), 50);
        assert_eq!(fit.line.ka[0], 0.1);
        assert_eq!(fit.line.ka[49], 0.3);
        assert_abs_diff_eq!(fit.line.speed[0], fit.predict(0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(fit.line.speed[49], 0.4, epsilon = 1e-10);
    }

    #[test]
    fn fewer_than_two_points_is_insufficient() {
        let err = fit_markstein(Regime::BurntGas, &[0.5, 20.0, 0.1], &[1.0, 0.5, 0.9], 10.0, 50)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);

        assert!(fit_markstein(Regime::BurntGas, &[], &[], 10.0, 50).is_err());
    }

    #[test]
    fn nan_rows_are_skipped_without_ending_scan() {
        let ka = [0.1, f64::NAN, 0.2, 0.3];
        let speed = [0.9, 0.85, f64::NAN, 0.7];
        let scan = prefix_scan(&ka, &speed, 10.0);
        assert_eq!(scan.points.len(), 2);
        assert_eq!(scan.non_finite, 2);
        assert_eq!(scan.cut_at, None);

        let scan = prefix_scan(&[0.1, f64::INFINITY, 0.2], &[1.0, 1.0, 1.0], 10.0);
        assert_eq!(scan.cut_at, Some(1));
        assert_eq!(scan.points.len(), 1);
    }

    #[test]
    fn identical_ka_gives_nan_slope() {
        let fit = fit_markstein(Regime::BurntGas, &[0.2, 0.2, 0.2], &[0.9, 0.8, 0.7], 10.0, 50).unwrap();
        assert!(fit.slope.is_nan());
        assert!(fit.markstein_number.is_nan());
        assert!(fit.rms_error.is_nan());
    }

    #[test]
    fn noisy_line_stays_close() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 0.002).unwrap();
        let ka: Vec<f64> = (0..40).map(|i| 0.01 * i as f64).collect();
        let speed: Vec<f64> = ka
            .iter()
            .map(|k| 1.0 - 2.0 * k + noise.sample(&mut rng))
            .collect();

        let fit = fit_markstein(Regime::BurntGas, &ka, &speed, 10.0, 50).unwrap();
        assert_abs_diff_eq!(fit.markstein_number, 2.0, epsilon = 0.05);
        assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 0.01);
        assert!(fit.rms_error > 0.0 && fit.rms_error < 0.005);
    }
}
