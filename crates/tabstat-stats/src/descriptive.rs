/// Descriptive statistics computed from a fully materialized dataset.
///
/// This is the two-pass closed form: the mean is taken first, then the squared
/// deviations from it are summed. It needs every value in memory, so the
/// streaming path uses [`RunningStats`](crate::running::RunningStats) instead;
/// this type serves as the reference it is checked against.
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The population variance of the dataset (divided by `n`).
    pub population_variance: f64,
    /// The sample variance of the dataset (divided by `n - 1`, `0` for a single value).
    pub sample_variance: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in any order.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use tabstat_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.population_variance, 2.0);
    /// assert_eq!(stats.sample_variance, 2.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let count = values.len();
        if count == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        let population_variance = sum_sq / n;
        let sample_variance = if count > 1 { sum_sq / (n - 1.0) } else { 0.0 };

        Some(Self {
            count,
            min,
            max,
            mean,
            population_variance,
            sample_variance,
        })
    }
}
