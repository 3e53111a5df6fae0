//! Single-pass summarization of delimited input
//!
//! [`summarize`] reads the header row, creates one [`ColumnStat`] per header
//! field and streams the data rows through them. Rows are processed strictly
//! in order; all recoverable problems are reported to a [`WarningSink`] and
//! skipped.
//!
//! ```text
//! csv reader
//!     ↓ header
//! Summarizer::new (one ColumnStat per column, kind Unset)
//!     ↓ rows
//! Summarizer::observe_row (kind inference + aggregation per field)
//!     ↓ end of stream / row limit
//! Summary (frozen, ready for reporting and plotting)
//! ```

use std::io;

use crate::{
    column::ColumnStat,
    error::{SummaryError, Warning, WarningSink},
    report::Summary,
};

/// Options controlling a summary run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Hide warnings. Offending rows and fields are still skipped.
    pub suppress_warnings: bool,
    /// Retain observations for distribution plots.
    pub plot: bool,
    /// Field delimiter.
    pub delimiter: u8,
    /// Stop after this many data rows.
    pub max_rows: Option<u64>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            suppress_warnings: false,
            plot: false,
            delimiter: b',',
            max_rows: None,
        }
    }
}

/// Per-run aggregation state.
#[derive(Debug, Clone)]
pub struct Summarizer {
    columns: Vec<ColumnStat>,
    delimiter: char,
    suppress_warnings: bool,
    rows_read: u64,
    skipped_rows: u64,
    skipped_fields: u64,
}

impl Summarizer {
    /// Creates one untyped column per header name.
    pub fn new<I, S>(headers: I, options: &SummaryOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = headers
            .into_iter()
            .map(|name| ColumnStat::new(name, options.plot))
            .collect();
        Self {
            columns,
            delimiter: char::from(options.delimiter),
            suppress_warnings: options.suppress_warnings,
            rows_read: 0,
            skipped_rows: 0,
            skipped_fields: 0,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnStat] {
        &self.columns
    }

    /// Number of data rows consumed so far, skipped ones included.
    #[must_use]
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    fn warn<S>(&self, sink: &mut S, warning: Warning)
    where
        S: WarningSink + ?Sized,
    {
        if !self.suppress_warnings {
            sink.warn(warning);
        }
    }

    fn join(&self, fields: &[&str]) -> String {
        let mut delimiter = [0; 4];
        fields.join(self.delimiter.encode_utf8(&mut delimiter))
    }

    /// Aggregates one decoded data row.
    ///
    /// A row whose field count differs from the header is skipped as a whole.
    /// Otherwise each field is handled independently: a rejected field is
    /// skipped and the rest of the row is still aggregated.
    ///
    /// Returns `false` if the row was skipped.
    pub fn observe_row<S>(&mut self, line: u64, fields: &[&str], sink: &mut S) -> bool
    where
        S: WarningSink + ?Sized,
    {
        self.rows_read += 1;

        if fields.len() != self.columns.len() {
            self.skipped_rows += 1;
            let warning = Warning::FieldCount {
                line,
                raw: self.join(fields),
                expected: self.columns.len(),
                found: fields.len(),
            };
            self.warn(sink, warning);
            return false;
        }

        let mut rejected = vec![];
        for (column, raw) in self.columns.iter_mut().zip(fields) {
            if let Err(error) = column.ingest(raw) {
                rejected.push(Warning::Field {
                    line,
                    column: column.name().to_owned(),
                    raw: (*raw).to_owned(),
                    error,
                });
            }
        }
        self.skipped_fields += rejected.len() as u64;
        for warning in rejected {
            self.warn(sink, warning);
        }
        true
    }

    /// Records a data row that could not be tokenized or decoded.
    pub fn reject_row<S>(&mut self, line: u64, raw: String, reason: String, sink: &mut S)
    where
        S: WarningSink + ?Sized,
    {
        self.rows_read += 1;
        self.skipped_rows += 1;
        self.warn(sink, Warning::UnreadableRow { line, raw, reason });
    }

    /// Freezes the aggregates for reporting.
    #[must_use]
    pub fn finish(self) -> Summary {
        Summary {
            columns: self.columns,
            rows_read: self.rows_read,
            skipped_rows: self.skipped_rows,
            skipped_fields: self.skipped_fields,
        }
    }
}

fn lossy_row(record: &csv::ByteRecord, delimiter: u8) -> String {
    let fields = record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>();
    fields.join(char::from(delimiter).encode_utf8(&mut [0; 4]))
}

/// Summarizes a delimited stream whose first row is the header.
///
/// The reader is consumed and dropped before this function returns, whether
/// it reached the end of input, hit `max_rows`, or failed.
///
/// # Errors
///
/// Fails if the header is missing or unreadable, or if reading the input
/// fails at the I/O level. Malformed data rows are reported to `sink` instead.
///
/// # Examples
///
/// ```
/// use tabstat_summary::{SummaryOptions, Warning, summarize};
///
/// let input = "a,b\n1,x\n2,yy\n3,zzz\n";
/// let mut warnings = Vec::<Warning>::new();
/// let summary = summarize(input.as_bytes(), &SummaryOptions::default(), &mut warnings).unwrap();
///
/// let b = &summary.columns()[1];
/// assert_eq!((b.min(), b.max(), b.mean()), (Some(1.0), Some(3.0), Some(2.0)));
/// assert!(warnings.is_empty());
/// ```
pub fn summarize<R, S>(
    input: R,
    options: &SummaryOptions,
    sink: &mut S,
) -> Result<Summary, SummaryError>
where
    R: io::Read,
    S: WarningSink + ?Sized,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(input);

    let mut record = csv::ByteRecord::new();
    if !reader
        .read_byte_record(&mut record)
        .map_err(|source| SummaryError::Header { source })?
    {
        return Err(SummaryError::MissingHeader);
    }
    let mut line = record.position().map_or(1, csv::Position::line);
    let headers = csv::StringRecord::from_byte_record(record.clone())
        .map_err(|source| SummaryError::HeaderEncoding { source })?;
    tracing::debug!(columns = headers.len(), "read header");

    let mut summarizer = Summarizer::new(&headers, options);
    loop {
        if options
            .max_rows
            .is_some_and(|max_rows| summarizer.rows_read() >= max_rows)
        {
            tracing::debug!(rows = summarizer.rows_read(), "row limit reached");
            break;
        }

        match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) if err.is_io_error() => return Err(SummaryError::Read { source: err }),
            Err(err) => {
                line = err.position().map_or(line + 1, csv::Position::line);
                let raw = lossy_row(&record, options.delimiter);
                summarizer.reject_row(line, raw, err.to_string(), sink);
                continue;
            }
        }

        line = record.position().map_or(line + 1, csv::Position::line);
        match record.iter().map(std::str::from_utf8).collect::<Result<Vec<_>, _>>() {
            Ok(fields) => {
                summarizer.observe_row(line, &fields, sink);
            }
            Err(err) => {
                let raw = lossy_row(&record, options.delimiter);
                summarizer.reject_row(line, raw, err.to_string(), sink);
            }
        }
    }

    let summary = summarizer.finish();
    tracing::info!(
        rows = summary.rows_read,
        skipped_rows = summary.skipped_rows,
        skipped_fields = summary.skipped_fields,
        "finished reading input"
    );
    Ok(summary)
}
