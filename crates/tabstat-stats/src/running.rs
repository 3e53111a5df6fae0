/// Single-pass accumulator for count, extrema, mean and variance.
///
/// Uses Welford's online update, keeping the running mean and the sum of
/// squared deviations from it (`m2`). Memory use is constant regardless of the
/// number of observations.
///
/// Non-finite observations are rejected by [`RunningStats::push`] and leave the
/// accumulator untouched.
///
/// # Examples
///
/// ```
/// use tabstat_stats::running::RunningStats;
///
/// let mut stats = RunningStats::new();
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     assert!(stats.push(value));
/// }
///
/// assert_eq!(stats.count(), 8);
/// assert_eq!(stats.min(), Some(2.0));
/// assert_eq!(stats.max(), Some(9.0));
/// assert!((stats.mean().unwrap() - 5.0).abs() < 1e-12);
/// assert!((stats.population_std_dev().unwrap() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Adds an observation.
    ///
    /// Returns `false` (and ignores the value) if it is `NaN` or infinite.
    #[expect(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }

        self.count += 1;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        let n = self.count as f64;
        let delta = value - self.mean;
        if delta.is_finite() {
            self.mean += delta / n;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        } else {
            // The difference overflows near the ends of the f64 range; work
            // with halved operands instead.
            let half = value / 2.0 - self.mean / 2.0;
            self.mean = self.mean - self.mean / n + value / n;
            let half2 = value / 2.0 - self.mean / 2.0;
            self.m2 += 4.0 * half * half2;
        }
        self.mean = self.mean.clamp(self.min, self.max);
        true
    }

    /// Combines another accumulator into this one.
    ///
    /// Uses the pairwise update of Chan et al., so the result equals the
    /// accumulator that would have seen both observation streams.
    ///
    /// ```
    /// use tabstat_stats::running::RunningStats;
    ///
    /// let mut left = RunningStats::new();
    /// let mut right = RunningStats::new();
    /// for value in [1.0, 2.0, 3.0] {
    ///     left.push(value);
    /// }
    /// for value in [4.0, 5.0, 6.0] {
    ///     right.push(value);
    /// }
    ///
    /// left.merge(&right);
    /// assert_eq!(left.count(), 6);
    /// assert_eq!(left.mean(), Some(3.5));
    /// assert_eq!(left.min(), Some(1.0));
    /// assert_eq!(left.max(), Some(6.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let (n_a, n_b, n) = (self.count as f64, other.count as f64, count as f64);

        if delta.is_finite() {
            self.mean += delta * (n_b / n);
            self.m2 += other.m2 + delta * delta * (n_a * n_b / n);
        } else {
            self.mean = self.mean * (n_a / n) + other.mean * (n_b / n);
            self.m2 = f64::INFINITY;
        }
        self.count = count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.mean = self.mean.clamp(self.min, self.max);
    }

    /// Number of accepted observations.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Smallest observation, or `None` when empty.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest observation, or `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Arithmetic mean, or `None` when empty.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Population variance (`m2 / n`).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    /// Sample variance with Bessel's correction (`m2 / (n - 1)`).
    ///
    /// A single observation has no spread, so its variance is `0`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample_variance(&self) -> Option<f64> {
        match self.count {
            0 => None,
            1 => Some(0.0),
            n => Some(self.m2 / (n - 1) as f64),
        }
    }

    #[must_use]
    pub fn population_std_dev(&self) -> Option<f64> {
        self.population_variance().map(f64::sqrt)
    }

    #[must_use]
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}
