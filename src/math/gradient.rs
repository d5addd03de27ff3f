//! Finite-difference gradient on a non-uniform grid.
//!
//! Interior points use the second-order three-point formula for uneven
//! spacing; the two endpoints use first-order one-sided differences:
//!
//! ```text
//! hd = x[i] - x[i-1], hs = x[i+1] - x[i]
//! f'(x[i]) ≈ (hd² f[i+1] + (hs² - hd²) f[i] - hs² f[i-1]) / (hs hd (hd + hs))
//! ```
//!
//! For uniform spacing this reduces to the familiar central difference.

/// Derivative of `f` with respect to `x`, sample by sample.
///
/// Returns `None` when the slices differ in length or hold fewer than 2 samples.
pub fn gradient(f: &[f64], x: &[f64]) -> Option<Vec<f64>> {
    let n = f.len();
    if n < 2 || x.len() != n {
        return None;
    }

    let mut out = Vec::with_capacity(n);
    out.push((f[1] - f[0]) / (x[1] - x[0]));

    for i in 1..n - 1 {
        let hd = x[i] - x[i - 1];
        let hs = x[i + 1] - x[i];
        let num = hd * hd * f[i + 1] + (hs * hs - hd * hd) * f[i] - hs * hs * f[i - 1];
        out.push(num / (hs * hd * (hd + hs)));
    }

    out.push((f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]));
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_is_exact_in_the_interior_on_uneven_grid() {
        let x = [0.0, 0.1, 0.35, 0.5, 0.9, 1.0];
        let f: Vec<f64> = x.iter().map(|v| v * v).collect();
        let g = gradient(&f, &x).unwrap();
        for i in 1..x.len() - 1 {
            assert!((g[i] - 2.0 * x[i]).abs() < 1e-12, "i={i} g={}", g[i]);
        }
        // One-sided ends are first order.
        assert!((g[0] - 0.1).abs() < 1e-12);
        assert!((g[5] - 1.9).abs() < 1e-12);
    }

    #[test]
    fn linear_field_has_constant_gradient() {
        let x = [0.0, 0.2, 0.3, 0.7, 1.5];
        let f: Vec<f64> = x.iter().map(|v| 4.0 - 3.0 * v).collect();
        let g = gradient(&f, &x).unwrap();
        assert!(g.iter().all(|v| (v + 3.0).abs() < 1e-12));
    }

    #[test]
    fn too_short_or_mismatched_is_none() {
        assert!(gradient(&[1.0], &[0.0]).is_none());
        assert!(gradient(&[1.0, 2.0], &[0.0]).is_none());
        assert_eq!(gradient(&[1.0, 3.0], &[0.0, 1.0]), Some(vec![2.0, 2.0]));
    }
}
