//! Extremum search and grid helpers.
//!
//! `argmin`/`argmax_abs` return the first index on ties. NaN entries never win a
//! comparison, so they are skipped unless every entry is NaN (then index 0).

/// Index of the smallest value, or `None` for an empty slice.
pub fn argmin(values: &[f64]) -> Option<usize> {
    best_index(values, |candidate, best| candidate < best)
}

/// Index of the largest absolute value, or `None` for an empty slice.
pub fn argmax_abs(values: &[f64]) -> Option<usize> {
    best_index(values, |candidate, best| candidate.abs() > best.abs())
}

fn best_index(values: &[f64], better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut best = 0usize;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if (values[best].is_nan() && !v.is_nan()) || better(v, values[best]) {
            best = i;
        }
    }
    Some(best)
}

/// `n` evenly spaced samples from `start` to `stop`, both ends included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            (0..n)
                .map(|i| if i + 1 == n { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_resolve_to_first_index() {
        assert_eq!(argmin(&[3.0, 1.0, 1.0, 2.0]), Some(1));
        assert_eq!(argmax_abs(&[-4.0, 2.0, 4.0]), Some(0));
    }

    #[test]
    fn nan_is_skipped() {
        assert_eq!(argmin(&[f64::NAN, 2.0, 1.0]), Some(2));
        assert_eq!(argmax_abs(&[1.0, f64::NAN, -7.0]), Some(2));
        assert_eq!(argmin(&[]), None);
    }

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(1.0, 2.0, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[4], 2.0);
        assert!((v[2] - 1.5).abs() < 1e-15);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
    }
}
