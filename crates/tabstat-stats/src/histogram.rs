use std::ops::Range;

/// An equal-width histogram of a dataset's distribution.
///
/// The span between the smallest and largest value is divided into bins of
/// identical width. The last bin is closed on both sides so the maximum
/// value is counted.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins in ascending order. Empty if the input had no finite values.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl HistogramBin {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.range.end - self.range.start
    }
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins.
    ///
    /// Non-finite values are ignored. When every value is identical the bins
    /// span a unit interval centered on that value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tabstat_stats::histogram::Histogram;
    /// let histogram = Histogram::new([1.0, 2.0, 2.5, 4.0, 5.0], 4);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [1, 2, 0, 2]);
    /// assert_eq!(histogram.total(), 5);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (start, span) = if max - min > 0.0 {
            (min, max - min)
        } else {
            (min - 0.5, 1.0)
        };
        let bin_width = span / num_bins as f64;

        // Boundaries are recomputed from the start to avoid accumulating error.
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: start + idx as f64 * bin_width..start + (idx + 1) as f64 * bin_width,
                count: 0,
            })
            .collect::<Vec<_>>();

        for val in values {
            let position = ((val - start) / bin_width).floor();
            let idx = if position <= 0.0 {
                0
            } else {
                (position as usize).min(num_bins - 1)
            };
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Height of `bin` when the histogram is normalized to unit area.
    ///
    /// ```
    /// # use tabstat_stats::histogram::Histogram;
    /// let histogram = Histogram::new([0.0, 1.0, 1.5, 2.0], 2);
    /// let area = histogram
    ///     .bins
    ///     .iter()
    ///     .map(|bin| histogram.density(bin) * bin.width())
    ///     .sum::<f64>();
    /// assert!((area - 1.0).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn density(&self, bin: &HistogramBin) -> f64 {
        let total = self.total();
        let width = bin.width();
        if total == 0 || width <= 0.0 {
            return 0.0;
        }
        bin.count as f64 / (total as f64 * width)
    }

    /// The tallest normalized bin height, `0` for an empty histogram.
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.bins
            .iter()
            .map(|bin| self.density(bin))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        let histogram = Histogram::new(std::iter::empty(), 16);
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.max_density(), 0.0);
    }

    #[test]
    fn test_zero_bins() {
        let histogram = Histogram::new([1.0, 2.0], 0);
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_all_same_value() {
        let histogram = Histogram::new([3.0; 10], 4);
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.total(), 10);
        assert_eq!(histogram.bins.first().unwrap().range.start, 2.5);
        assert!(histogram.bins.iter().any(|bin| bin.range.contains(&3.0) && bin.count == 10));
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 10.0], 5);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[4].count, 1);
    }

    #[test]
    fn test_ignores_non_finite() {
        let histogram = Histogram::new([1.0, f64::NAN, 2.0, f64::INFINITY], 2);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_bins_are_contiguous() {
        let values = (0..100).map(f64::from);
        let histogram = Histogram::new(values, 16);
        for pair in histogram.bins.windows(2) {
            assert!((pair[0].range.end - pair[1].range.start).abs() < 1e-9);
        }
        assert_eq!(histogram.total(), 100);
    }
}
