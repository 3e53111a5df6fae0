use std::f64::consts::PI;

/// Probability density of the normal distribution `N(mean, std_dev²)` at `x`.
///
/// Returns `None` when `std_dev` is not strictly positive, as the density is
/// then undefined.
///
/// ```
/// # use tabstat_stats::normal::normal_pdf;
/// let peak = normal_pdf(0.0, 0.0, 1.0).unwrap();
/// assert!((peak - 0.398_942_280_401_432_7).abs() < 1e-15);
/// assert_eq!(normal_pdf(0.0, 0.0, 0.0), None);
/// ```
#[must_use]
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> Option<f64> {
    if std_dev.is_nan() || std_dev <= 0.0 {
        return None;
    }
    let z = (x - mean) / std_dev;
    Some((-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt()))
}

/// Evaluates [`normal_pdf`] at `num_points` evenly spaced points over `range`.
///
/// Both ends of the range are included. Fewer than two points yields only the
/// start of the range.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn normal_curve(
    range: std::ops::RangeInclusive<f64>,
    num_points: usize,
    mean: f64,
    std_dev: f64,
) -> Option<Vec<(f64, f64)>> {
    let (start, end) = (*range.start(), *range.end());
    let steps = num_points.max(2) - 1;
    let step = (end - start) / steps as f64;
    let count = if num_points < 2 { 1 } else { num_points };
    (0..count)
        .map(|i| {
            let x = start + i as f64 * step;
            normal_pdf(x, mean, std_dev).map(|y| (x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetry() {
        let left = normal_pdf(8.0, 10.0, 2.0).unwrap();
        let right = normal_pdf(12.0, 10.0, 2.0).unwrap();
        assert!((left - right).abs() < 1e-15);
    }

    #[test]
    fn test_one_sigma_ratio() {
        let peak = normal_pdf(5.0, 5.0, 3.0).unwrap();
        let sigma = normal_pdf(8.0, 5.0, 3.0).unwrap();
        assert!((sigma / peak - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_curve_endpoints() {
        let curve = normal_curve(-1.0..=1.0, 5, 0.0, 1.0).unwrap();
        assert_eq!(curve.len(), 5);
        assert_eq!(curve.first().unwrap().0, -1.0);
        assert!((curve.last().unwrap().0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_curve_undefined_without_spread() {
        assert!(normal_curve(0.0..=1.0, 10, 0.5, 0.0).is_none());
    }
}
