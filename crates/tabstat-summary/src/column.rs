//! Per-column type inference and aggregation
//!
//! Each input column is tracked by a [`ColumnStat`]. The column's
//! [`ColumnKind`] is decided by the first non-empty field it receives and is
//! fixed from then on:
//!
//! - **Numeric**: fields are parsed as `f64`; unparseable, `NaN` and infinite
//!   values are rejected with a [`FieldError`]
//! - **Text**: the observation is the field's length in characters
//!
//! Observations feed a [`RunningStats`] accumulator, so memory stays constant
//! per column unless samples are retained for plotting.
//!
//! # Examples
//!
//! ```
//! use tabstat_summary::column::{ColumnKind, ColumnStat};
//!
//! let mut column = ColumnStat::new("price", false);
//! column.ingest("").unwrap(); // empty fields do not decide the kind
//! assert_eq!(column.kind(), ColumnKind::Unset);
//!
//! column.ingest("2.5").unwrap();
//! column.ingest("7.5").unwrap();
//! assert_eq!(column.kind(), ColumnKind::Numeric);
//! assert_eq!(column.mean(), Some(5.0));
//!
//! // The kind is fixed; text is now an error, not a reclassification.
//! assert!(column.ingest("n/a").is_err());
//! assert_eq!(column.count(), 2);
//! ```

use std::num::ParseFloatError;

use tabstat_stats::running::RunningStats;

/// Inferred type of a column.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::IsVariant,
    serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// No non-empty field has been seen yet.
    #[default]
    #[display("unset")]
    Unset,
    #[display("numeric")]
    Numeric,
    #[display("text")]
    Text,
}

impl ColumnKind {
    /// Decides the kind from a column's first non-empty field.
    #[must_use]
    pub fn probe(raw: &str) -> Self {
        if raw.parse::<f64>().is_ok() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}

/// A field that could not be turned into an observation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FieldError {
    #[display("{source}")]
    Parse { source: ParseFloatError },
    #[display("is not a number")]
    NotANumber,
    #[display("infinity")]
    Infinite,
}

fn parse_numeric(raw: &str) -> Result<f64, FieldError> {
    let value = raw
        .parse::<f64>()
        .map_err(|source| FieldError::Parse { source })?;
    if value.is_nan() {
        return Err(FieldError::NotANumber);
    }
    if value.is_infinite() {
        return Err(FieldError::Infinite);
    }
    Ok(value)
}

#[expect(clippy::cast_precision_loss)]
fn text_length(raw: &str) -> f64 {
    raw.chars().count() as f64
}

/// Running state of one input column.
#[derive(Debug, Clone)]
pub struct ColumnStat {
    name: String,
    kind: ColumnKind,
    stats: RunningStats,
    samples: Option<Vec<f64>>,
}

impl ColumnStat {
    /// Creates an untyped column.
    ///
    /// With `keep_samples`, every accepted observation is also retained in
    /// order for distribution plots.
    pub fn new<S>(name: S, keep_samples: bool) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: ColumnKind::Unset,
            stats: RunningStats::new(),
            samples: keep_samples.then(Vec::new),
        }
    }

    /// Maps a raw field to an observation according to the column's kind.
    ///
    /// Returns `Ok(None)` for an empty field while the column is still
    /// [`ColumnKind::Unset`].
    pub fn coerce(&mut self, raw: &str) -> Result<Option<f64>, FieldError> {
        if self.kind.is_unset() {
            if raw.is_empty() {
                return Ok(None);
            }
            self.kind = ColumnKind::probe(raw);
            tracing::debug!(column = %self.name, kind = %self.kind, "inferred column kind");
        }

        match self.kind {
            ColumnKind::Unset => unreachable!("column kind decided above"),
            ColumnKind::Numeric => parse_numeric(raw).map(Some),
            ColumnKind::Text => Ok(Some(text_length(raw))),
        }
    }

    /// Adds an observation, returning `false` if it is not finite.
    pub fn observe(&mut self, value: f64) -> bool {
        if !self.stats.push(value) {
            return false;
        }
        if let Some(samples) = &mut self.samples {
            samples.push(value);
        }
        true
    }

    /// Coerces and observes a raw field.
    ///
    /// Returns whether an observation was recorded.
    pub fn ingest(&mut self, raw: &str) -> Result<bool, FieldError> {
        match self.coerce(raw)? {
            Some(value) => Ok(self.observe(value)),
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.stats.count()
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.stats.min()
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.stats.max()
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        self.stats.mean()
    }

    /// Sample standard deviation (Bessel-corrected, `0` for one observation).
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        self.stats.sample_std_dev()
    }

    /// Mean and standard deviation, or `None` if nothing was observed.
    #[must_use]
    pub fn finalize(&self) -> Option<(f64, f64)> {
        self.mean().zip(self.std_dev())
    }

    /// Retained observations, in observation order, if sampling is enabled.
    #[must_use]
    pub fn samples(&self) -> Option<&[f64]> {
        self.samples.as_deref()
    }

    #[must_use]
    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe() {
        assert_eq!(ColumnKind::probe("1"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::probe("-3.5e2"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::probe("NaN"), ColumnKind::Numeric);
        assert_eq!(ColumnKind::probe("x"), ColumnKind::Text);
        assert_eq!(ColumnKind::probe("1,5"), ColumnKind::Text);
    }

    #[test]
    fn test_text_uses_character_length() {
        let mut column = ColumnStat::new("b", false);
        assert_eq!(column.coerce("héllo"), Ok(Some(5.0)));
        assert_eq!(column.kind(), ColumnKind::Text);
        // Numeric-looking values in a text column are still measured by length.
        assert_eq!(column.coerce("12345678"), Ok(Some(8.0)));
        assert_eq!(column.coerce(""), Ok(Some(0.0)));
    }

    #[test]
    fn test_kind_is_stable() {
        let mut column = ColumnStat::new("a", false);
        assert_eq!(column.ingest("abc"), Ok(true));
        assert_eq!(column.ingest("42"), Ok(true));
        assert_eq!(column.kind(), ColumnKind::Text);
        assert_eq!(column.max(), Some(3.0));
    }

    #[test]
    fn test_numeric_rejections() {
        let mut column = ColumnStat::new("a", false);
        assert_eq!(column.ingest("1"), Ok(true));
        assert!(matches!(column.ingest("abc"), Err(FieldError::Parse { .. })));
        assert!(matches!(column.ingest(""), Err(FieldError::Parse { .. })));
        assert_eq!(column.ingest("NaN"), Err(FieldError::NotANumber));
        assert_eq!(column.ingest("inf"), Err(FieldError::Infinite));
        assert_eq!(column.ingest("-infinity"), Err(FieldError::Infinite));
        assert_eq!(column.count(), 1);
    }

    #[test]
    fn test_first_nan_types_column_but_is_rejected() {
        let mut column = ColumnStat::new("a", false);
        assert_eq!(column.ingest("NaN"), Err(FieldError::NotANumber));
        assert_eq!(column.kind(), ColumnKind::Numeric);
        assert_eq!(column.count(), 0);
        assert_eq!(column.finalize(), None);
    }

    #[test]
    fn test_empty_fields_leave_column_unset() {
        let mut column = ColumnStat::new("a", true);
        for _ in 0..3 {
            assert_eq!(column.ingest(""), Ok(false));
        }
        assert_eq!(column.kind(), ColumnKind::Unset);
        assert_eq!(column.count(), 0);
        assert_eq!(column.min(), None);
        assert_eq!(column.samples(), Some(&[][..]));
    }

    #[test]
    fn test_samples_follow_observation_order() {
        let mut column = ColumnStat::new("a", true);
        for raw in ["3", "1", "bad", "2"] {
            let _ = column.ingest(raw);
        }
        assert_eq!(column.samples(), Some(&[3.0, 1.0, 2.0][..]));
    }

    #[test]
    fn test_samples_disabled_by_default() {
        let mut column = ColumnStat::new("a", false);
        column.ingest("1").unwrap();
        assert_eq!(column.samples(), None);
    }

    #[test]
    fn test_observe_rejects_non_finite() {
        let mut column = ColumnStat::new("a", true);
        assert!(!column.observe(f64::NAN));
        assert!(!column.observe(f64::NEG_INFINITY));
        assert!(column.observe(1.0));
        assert_eq!(column.count(), 1);
        assert_eq!(column.samples(), Some(&[1.0][..]));
    }
}
