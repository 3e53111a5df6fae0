//! Plotter-facing view of a column's observations

use crate::column::ColumnStat;

/// Everything a plotter needs to draw one column's distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution<'a> {
    pub name: &'a str,
    /// Every accepted observation, in observation order.
    pub samples: &'a [f64],
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl<'a> Distribution<'a> {
    /// Builds the view for a column with at least one observation, retained
    /// samples and a finite spread.
    #[must_use]
    pub fn from_column(column: &'a ColumnStat) -> Option<Self> {
        let samples = column.samples()?;
        let (mean, std_dev) = column.finalize().filter(|(_, s)| s.is_finite())?;
        Some(Self {
            name: column.name(),
            samples,
            mean,
            std_dev,
            min: column.min()?,
            max: column.max()?,
        })
    }
}

/// Renders distributions, typically to image files.
pub trait DistributionPlotter {
    type Error;

    fn plot(&mut self, distribution: &Distribution<'_>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::{SummaryOptions, Warning, summarize};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Vec<f64>, f64, f64)>,
    }

    impl DistributionPlotter for Recorder {
        type Error = Infallible;

        fn plot(&mut self, distribution: &Distribution<'_>) -> Result<(), Infallible> {
            self.seen.push((
                distribution.name.to_owned(),
                distribution.samples.to_vec(),
                distribution.min,
                distribution.max,
            ));
            Ok(())
        }
    }

    #[test]
    fn test_skips_columns_without_data() {
        let options = SummaryOptions {
            plot: true,
            ..SummaryOptions::default()
        };
        let input = "a,empty,b\n2,,x\n1,,yyy\n";
        let summary =
            summarize(input.as_bytes(), &options, &mut Vec::<Warning>::new()).unwrap();

        let mut recorder = Recorder::default();
        let Ok(plotted) = summary.plot_with(&mut recorder);
        assert_eq!(plotted, 2);
        assert_eq!(
            recorder.seen,
            [
                ("a".to_owned(), vec![2.0, 1.0], 1.0, 2.0),
                ("b".to_owned(), vec![1.0, 3.0], 1.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_no_distributions_without_samples() {
        let summary = summarize(
            "a\n1\n2\n".as_bytes(),
            &SummaryOptions::default(),
            &mut Vec::<Warning>::new(),
        )
        .unwrap();
        assert_eq!(summary.distributions().count(), 0);
    }

    #[test]
    fn test_skips_overflowing_spread() {
        let options = SummaryOptions {
            plot: true,
            ..SummaryOptions::default()
        };
        let input = "a,b\n1e308,1\n-1e308,2\n";
        let summary =
            summarize(input.as_bytes(), &options, &mut Vec::<Warning>::new()).unwrap();
        let names = summary.distributions().map(|d| d.name).collect::<Vec<_>>();
        assert_eq!(names, ["b"]);
    }

    #[test]
    fn test_carries_mean_and_std_dev() {
        let options = SummaryOptions {
            plot: true,
            ..SummaryOptions::default()
        };
        let summary =
            summarize("a\n1\n3\n5\n".as_bytes(), &options, &mut Vec::<Warning>::new()).unwrap();
        let distribution = summary.distributions().next().unwrap();
        assert_eq!(distribution.mean, 3.0);
        assert!((distribution.std_dev - 2.0).abs() < 1e-12);
    }
}
