//! Trapezoidal quadrature over sampled data.

/// `∫ f dx` by the trapezoidal rule over the whole sample range.
///
/// Fewer than 2 samples integrate to `0.0`. Slices must be the same length.
pub fn trapezoid(f: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(f.len(), x.len());
    f.windows(2)
        .zip(x.windows(2))
        .map(|(fw, xw)| 0.5 * (fw[0] + fw[1]) * (xw[1] - xw[0]))
        .sum()
}
