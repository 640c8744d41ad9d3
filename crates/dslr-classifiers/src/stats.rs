//! Numeric helpers over ordered `f64` sequences.
//!
//! Normalization and the sigmoid clamp both go through these functions, and
//! they are the same primitives a descriptive summary (count, mean, std,
//! quartiles, extremes) is built from. Every value-producing function returns
//! `None` on empty input instead of NaN.
use statrs::statistics::Statistics;

pub fn count(values: &[f64]) -> usize {
    values.len()
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(Statistics::mean(values))
}

/// Population variance (divisor `n`, not `n - 1`).
///
/// Two-pass around the mean, so a constant column yields exactly zero.
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    Some(ss / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Nearest-rank quantile: the element at `floor(n * q)` of the sorted values,
/// clamped to the last index. `q` is clamped to `[0, 1]`.
///
/// No interpolation takes place, so the result is always one of the inputs.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q = clamp(q, 0.0, 1.0);
    let idx = ((sorted.len() as f64 * q).floor() as usize).min(sorted.len() - 1);
    Some(sorted[idx])
}

/// Upper median for even lengths, middle element for odd lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Clamp `value` into `[lo, hi]`. NaN passes through unchanged.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    debug_assert!(lo <= hi, "clamp bounds are inverted");
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_input_has_no_statistics() {
        assert_eq!(count(&[]), 0);
        assert_eq!(mean(&[]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(quantile(&[], 0.25), None);
    }

    #[test]
    fn population_std_uses_n_divisor() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&v).unwrap(), 3.0);
        assert_relative_eq!(variance(&v).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(std_dev(&v).unwrap(), 2.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn constant_values_have_zero_spread() {
        let v = [0.1; 7];
        assert_eq!(std_dev(&v), Some(0.0));
    }

    #[test]
    fn quartiles_use_nearest_rank() {
        let v = [9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 8.0, 4.0];
        assert_eq!(quantile(&v, 0.25), Some(3.0));
        assert_eq!(median(&v), Some(5.0));
        assert_eq!(quantile(&v, 0.75), Some(8.0));
        assert_eq!(quantile(&v, 1.0), Some(9.0));
        assert_eq!(min(&v), Some(1.0));
        assert_eq!(max(&v), Some(9.0));
    }

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(150.0, -100.0, 100.0), 100.0);
        assert_eq!(clamp(-150.0, -100.0, 100.0), -100.0);
        assert_eq!(clamp(3.5, -100.0, 100.0), 3.5);
        assert!(clamp(f64::NAN, -1.0, 1.0).is_nan());
    }
}
