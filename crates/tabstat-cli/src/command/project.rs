//! Column selection for `extract` and `filter`

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tabstat_summary::{Warning, WarningSink};

use crate::util::{self, Output, StderrWarnings};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExtractArg {
    /// Zero-based column indexes to write, separated by commas
    #[arg(long)]
    cols: String,
    /// Print the bare value when a single column is selected
    #[arg(long)]
    plain: bool,
    /// Field delimiter of the input, a single ASCII character (`\t` for tab)
    #[arg(long, default_value = ",", value_parser = util::parse_delimiter)]
    delimiter: u8,
    /// Skip the first line of the input
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    skip_header: bool,
    /// Input file path (stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FilterArg {
    /// Zero-based column indexes to write, separated by commas
    #[arg(long)]
    cols: String,
    /// Print the bare value when a single column is selected
    #[arg(long)]
    plain: bool,
    /// Input file path (stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProjectOptions {
    plain: bool,
    delimiter: u8,
    skip_header: bool,
}

pub(crate) fn run_extract(arg: &ExtractArg) -> anyhow::Result<()> {
    let ExtractArg {
        cols,
        plain,
        delimiter,
        skip_header,
        file,
    } = arg;
    let options = ProjectOptions {
        plain: *plain,
        delimiter: *delimiter,
        skip_header: *skip_header,
    };
    run_projection(file.as_deref(), cols, &options)
}

pub(crate) fn run_filter(arg: &FilterArg) -> anyhow::Result<()> {
    let FilterArg { cols, plain, file } = arg;
    let options = ProjectOptions {
        plain: *plain,
        delimiter: b',',
        skip_header: false,
    };
    run_projection(file.as_deref(), cols, &options)
}

fn run_projection(
    file: Option<&Path>,
    cols: &str,
    options: &ProjectOptions,
) -> anyhow::Result<()> {
    let columns = util::parse_column_indexes(cols)?;
    let input = util::open_input(file)?;
    let mut output = Output::stdout();
    let mut warnings = StderrWarnings::default();
    let rows = project(input, &mut output, &columns, options, &mut warnings)?;
    output.finish()?;
    tracing::info!(rows, warnings = warnings.count(), "finished projection");
    Ok(())
}

/// Where selected fields go.
enum Emitter<W: io::Write> {
    Plain(W),
    Csv(csv::Writer<W>),
}

impl<W: io::Write> Emitter<W> {
    fn emit<'a, I>(&mut self, fields: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        match self {
            Emitter::Plain(writer) => {
                for field in fields {
                    writer.write_all(field)?;
                }
                writer.write_all(b"\n")?;
            }
            Emitter::Csv(writer) => writer.write_record(fields)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Emitter::Plain(writer) => writer.flush(),
            Emitter::Csv(writer) => writer.flush(),
        }
    }
}

fn lossy_row(record: &csv::ByteRecord, delimiter: u8) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(&char::from(delimiter).to_string())
}

/// Copies `columns` of every row of `input` to `output`, in the given order.
///
/// Rows that cannot be read or lack a selected column are reported to `sink`
/// and skipped. Returns the number of rows written.
fn project<R, W, S>(
    input: R,
    output: W,
    columns: &[usize],
    options: &ProjectOptions,
    sink: &mut S,
) -> anyhow::Result<u64>
where
    R: io::Read,
    W: io::Write,
    S: WarningSink + ?Sized,
{
    let max_index = columns
        .iter()
        .copied()
        .max()
        .context("No column indexes given")?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(input);
    let mut emitter = if options.plain && columns.len() == 1 {
        Emitter::Plain(output)
    } else {
        Emitter::Csv(csv::Writer::from_writer(output))
    };

    let mut record = csv::ByteRecord::new();
    let mut line = 0;
    let mut rows = 0;
    let mut header_pending = options.skip_header;
    loop {
        match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) if err.is_io_error() => return Err(err).context("Failed to read input"),
            Err(err) => {
                line = err.position().map_or(line + 1, csv::Position::line);
                header_pending = false;
                sink.warn(Warning::UnreadableRow {
                    line,
                    raw: lossy_row(&record, options.delimiter),
                    reason: err.to_string(),
                });
                continue;
            }
        }
        line = record.position().map_or(line + 1, csv::Position::line);
        if header_pending {
            header_pending = false;
            continue;
        }

        if record.len() <= max_index {
            sink.warn(Warning::FieldCount {
                line,
                raw: lossy_row(&record, options.delimiter),
                expected: max_index + 1,
                found: record.len(),
            });
            continue;
        }
        emitter.emit(columns.iter().map(|&i| &record[i]))?;
        rows += 1;
    }

    emitter.flush().context("Failed to flush output")?;
    tracing::debug!(rows, "projected rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTRACT: ProjectOptions = ProjectOptions {
        plain: false,
        delimiter: b',',
        skip_header: true,
    };
    const FILTER: ProjectOptions = ProjectOptions {
        plain: false,
        delimiter: b',',
        skip_header: false,
    };

    fn run(input: &str, columns: &[usize], options: &ProjectOptions) -> (String, Vec<Warning>) {
        let mut out = vec![];
        let mut warnings = Vec::<Warning>::new();
        project(input.as_bytes(), &mut out, columns, options, &mut warnings).unwrap();
        (String::from_utf8(out).unwrap(), warnings)
    }

    #[test]
    fn test_extract_reorders_columns_and_skips_header() {
        let (out, warnings) = run("h1,h2,h3\n1,2,3\n6,7,8\n", &[2, 0], &EXTRACT);
        assert_eq!(out, "3,1\n8,6\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_filter_keeps_header() {
        let (out, _) = run("h1,h2\n1,2\n", &[1], &FILTER);
        assert_eq!(out, "h2\n2\n");
    }

    #[test]
    fn test_short_row_is_skipped_with_warning() {
        let (out, warnings) = run("h1,h2,h3\n1,2,3\n4,5\n6,7,8\n", &[2], &EXTRACT);
        assert_eq!(out, "3\n8\n");
        assert_eq!(
            warnings,
            [Warning::FieldCount {
                line: 3,
                raw: "4,5".to_owned(),
                expected: 3,
                found: 2,
            }]
        );
    }

    #[test]
    fn test_plain_prints_bare_value() {
        let input = "text\n\"hello, world\"\n";
        let (quoted, _) = run(input, &[0], &EXTRACT);
        assert_eq!(quoted, "\"hello, world\"\n");

        let plain = ProjectOptions {
            plain: true,
            ..EXTRACT
        };
        let (bare, _) = run(input, &[0], &plain);
        assert_eq!(bare, "hello, world\n");
    }

    #[test]
    fn test_plain_ignored_for_multiple_columns() {
        let plain = ProjectOptions {
            plain: true,
            ..FILTER
        };
        let (out, _) = run("a,b\n", &[0, 1], &plain);
        assert_eq!(out, "a,b\n");
    }

    #[test]
    fn test_custom_delimiter_output_is_comma_separated() {
        let options = ProjectOptions {
            delimiter: b';',
            ..EXTRACT
        };
        let (out, _) = run("h1;h2\n1;2\n", &[1, 0], &options);
        assert_eq!(out, "2,1\n");
    }

    #[test]
    fn test_no_columns_is_an_error() {
        let result = project(
            "a\n".as_bytes(),
            Vec::<u8>::new(),
            &[],
            &FILTER,
            &mut Vec::<Warning>::new(),
        );
        assert!(result.is_err());
    }
}
