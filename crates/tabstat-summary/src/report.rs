//! Frozen summary and its tabular rendering
//!
//! A [`Summary`] is the read-only result of a run. [`Summary::report`] turns it
//! into a [`Report`] with one [`ReportRow`] per column, which can be rendered
//! as an aligned text table or serialized with `serde`.
//!
//! Columns that never received an observation have no defined statistics;
//! they render as [`NO_DATA`] in the table and as `null` when serialized.

use std::io::{self, Write};

use serde::Serialize;

use crate::{
    column::{ColumnKind, ColumnStat},
    distribution::{Distribution, DistributionPlotter},
};

/// Placeholder printed for statistics of a column without observations.
pub const NO_DATA: &str = "N/A";

const HEADER: [&str; 5] = ["name", "min", "max", "mean", "stddev"];

/// Aggregates of a finished run.
#[derive(Debug, Clone)]
pub struct Summary {
    pub(crate) columns: Vec<ColumnStat>,
    /// Data rows consumed, skipped ones included.
    pub rows_read: u64,
    /// Rows skipped because they were unreadable or had the wrong field count.
    pub skipped_rows: u64,
    /// Individual fields rejected by numeric columns.
    pub skipped_fields: u64,
}

impl Summary {
    /// Columns in input order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnStat] {
        &self.columns
    }

    #[must_use]
    pub fn report(&self) -> Report {
        Report {
            columns: self.columns.iter().map(ReportRow::from_column).collect(),
            rows_read: self.rows_read,
            skipped_rows: self.skipped_rows,
            skipped_fields: self.skipped_fields,
        }
    }

    /// Plot inputs for every column that has observations and retained samples.
    pub fn distributions(&self) -> impl Iterator<Item = Distribution<'_>> {
        self.columns.iter().filter_map(Distribution::from_column)
    }

    /// Hands every available distribution to `plotter`, in column order.
    ///
    /// Returns the number of distributions plotted.
    pub fn plot_with<P>(&self, plotter: &mut P) -> Result<usize, P::Error>
    where
        P: DistributionPlotter + ?Sized,
    {
        let mut plotted = 0;
        for distribution in self.distributions() {
            plotter.plot(&distribution)?;
            plotted += 1;
        }
        Ok(plotted)
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub kind: ColumnKind,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    #[serde(rename = "stddev")]
    pub std_dev: Option<f64>,
}

impl ReportRow {
    fn from_column(column: &ColumnStat) -> Self {
        Self {
            name: column.name().to_owned(),
            kind: column.kind(),
            count: column.count(),
            min: column.min(),
            max: column.max(),
            mean: column.mean(),
            std_dev: column.std_dev(),
        }
    }

    fn cells(&self) -> [String; 5] {
        let fmt = |value: Option<f64>| {
            value.map_or_else(|| NO_DATA.to_owned(), |v| format!("{v:.6}"))
        };
        [
            self.name.clone(),
            fmt(self.min),
            fmt(self.max),
            fmt(self.mean),
            fmt(self.std_dev),
        ]
    }
}

/// Per-column report with run totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub columns: Vec<ReportRow>,
    pub rows_read: u64,
    pub skipped_rows: u64,
    pub skipped_fields: u64,
}

impl Report {
    /// Writes an aligned table with the columns `name min max mean stddev`.
    ///
    /// Names are left-aligned and statistics right-aligned, each column as
    /// wide as its widest cell.
    ///
    /// ```
    /// use tabstat_summary::{SummaryOptions, Warning, summarize};
    ///
    /// let input = "a,b\n1,\n3,\n";
    /// let mut warnings = Vec::<Warning>::new();
    /// let summary = summarize(input.as_bytes(), &SummaryOptions::default(), &mut warnings).unwrap();
    /// let mut out = vec![];
    /// summary.report().write_table(&mut out).unwrap();
    ///
    /// let table = String::from_utf8(out).unwrap();
    /// assert_eq!(
    ///     table,
    ///     "name       min       max      mean    stddev\n\
    ///      a     1.000000  3.000000  2.000000  1.414214\n\
    ///      b          N/A       N/A       N/A       N/A\n"
    /// );
    /// ```
    pub fn write_table<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        let rows = self
            .columns
            .iter()
            .map(ReportRow::cells)
            .collect::<Vec<_>>();

        let mut widths = HEADER.map(str::len);
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = HEADER.map(str::to_owned);
        for cells in std::iter::once(&header).chain(&rows) {
            let mut line = format!("{:<width$}", cells[0], width = widths[0]);
            for (cell, width) in cells.iter().zip(widths).skip(1) {
                line.push_str(&format!("  {cell:>width$}"));
            }
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}
