//! Streaming per-column statistics for delimited text
//!
//! This crate reads a CSV-like stream once, infers each column's kind from the
//! values it sees and keeps constant-memory running statistics per column.
//!
//! # Overview
//!
//! 1. **Read Header** ([`summarize`]): the first row names the columns and fixes
//!    their number
//! 2. **Infer Kinds** ([`column::ColumnKind`]): the first non-empty field of a
//!    column decides whether it is numeric or text; the decision is final
//! 3. **Aggregate** ([`column::ColumnStat`]): numbers, or text lengths, feed a
//!    Welford accumulator; malformed rows and fields are skipped and reported
//!    as [`Warning`]s
//! 4. **Report** ([`report::Report`]): `name, min, max, mean, stddev` per column
//! 5. **Plot** ([`distribution::DistributionPlotter`]): optional per-column
//!    histograms from retained samples
//!
//! # Examples
//!
//! ```
//! use tabstat_summary::{ColumnKind, SummaryOptions, Warning, summarize};
//!
//! let input = "a\n1\nNaN\n3\n";
//! let mut warnings = Vec::<Warning>::new();
//! let summary = summarize(input.as_bytes(), &SummaryOptions::default(), &mut warnings)?;
//!
//! let a = &summary.columns()[0];
//! assert_eq!(a.kind(), ColumnKind::Numeric);
//! assert_eq!(a.count(), 2);
//! assert_eq!(a.mean(), Some(2.0));
//!
//! assert_eq!(warnings.len(), 1);
//! println!("{}", warnings[0]);
//! # Ok::<(), tabstat_summary::SummaryError>(())
//! ```

pub use self::{
    column::{ColumnKind, ColumnStat, FieldError},
    distribution::{Distribution, DistributionPlotter},
    error::{SummaryError, Warning, WarningSink},
    report::{NO_DATA, Report, ReportRow, Summary},
    summarizer::{Summarizer, SummaryOptions, summarize},
};

pub mod column;
pub mod distribution;
pub mod error;
pub mod report;
pub mod summarizer;
