//! Ordinary least squares.
//!
//! The Markstein fit is a first-degree polynomial `y = a*x + b`. We build the
//! design matrix `[x, 1]` and solve it with SVD, which copes with tall systems
//! and reports rank trouble instead of panicking.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol)
            && beta.iter().all(|v| v.is_finite())
        {
            return Some(beta);
        }
    }

    None
}

/// Least-squares line through `(x, y)`; returns `(slope, intercept)`.
///
/// `None` when fewer than 2 points are given, the slices differ in length, or
/// all `x` values coincide (slope undefined).
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let n = x.len();
    if n < 2 || y.len() != n {
        return None;
    }

    let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = x_max.abs().max(x_min.abs()).max(1.0);
    if !(x_max - x_min).is_finite() || (x_max - x_min) <= 1e-12 * scale {
        return None;
    }

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { x[i] } else { 1.0 });
    let rhs = DVector::from_column_slice(y);
    let beta = solve_least_squares(&design, &rhs)?;
    Some((beta[0], beta[1]))
}
