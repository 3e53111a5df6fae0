//! Fatal errors and recoverable warnings raised while summarizing input

use crate::column::FieldError;

/// Conditions that stop a summary run.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SummaryError {
    #[display("input has no header row")]
    MissingHeader,
    #[display("could not read header: {source}")]
    Header { source: csv::Error },
    #[display("could not decode header: {source}")]
    HeaderEncoding { source: csv::FromUtf8Error },
    #[display("failed to read input: {source}")]
    Read { source: csv::Error },
}

/// A skipped row or field.
///
/// Warnings never stop processing; the offending row or field is left out of
/// the statistics and reported here with its line number and raw content.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::IsVariant)]
pub enum Warning {
    /// A row could not be tokenized or decoded.
    #[display("Could not parse line (line {line}, '{raw}'): {reason}")]
    UnreadableRow {
        line: u64,
        raw: String,
        reason: String,
    },
    /// A row whose field count differs from the header's.
    #[display("Line has {found} fields, expected {expected} (line {line}, '{raw}')")]
    FieldCount {
        line: u64,
        raw: String,
        expected: usize,
        found: usize,
    },
    /// A field rejected by its numeric column.
    #[display("Could not parse numeric value in column '{column}' (line {line}, '{raw}'): {error}")]
    Field {
        line: u64,
        column: String,
        raw: String,
        error: FieldError,
    },
}

impl Warning {
    #[must_use]
    pub fn line(&self) -> u64 {
        match self {
            Warning::UnreadableRow { line, .. }
            | Warning::FieldCount { line, .. }
            | Warning::Field { line, .. } => *line,
        }
    }
}

/// Destination for warnings produced during a run.
pub trait WarningSink {
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}
