use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tabstat_summary::{Warning, WarningSink};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: BufWriter<StdoutLock<'static>>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: BufWriter::new(io::stdout().lock()),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        Ok(())
    }

    /// Flushes buffered output. Call once, after everything has been written.
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Prints warnings to stderr as they arrive.
#[derive(Debug, Default)]
pub struct StderrWarnings {
    count: u64,
}

impl StderrWarnings {
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl WarningSink for StderrWarnings {
    fn warn(&mut self, warning: Warning) {
        eprintln!("{warning}");
        self.count += 1;
    }
}

/// Opens `path` for reading, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Parses a field delimiter given on the command line.
///
/// The delimiter must be exactly one ASCII character. `\t` is accepted as a
/// spelling of the tab character.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    let value = if value == "\\t" { "\t" } else { value };
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{value}'"
        )),
    }
}

/// Parses a comma-separated list of zero-based column indexes.
///
/// Empty entries are ignored, so `"0,,2,"` selects columns 0 and 2.
pub fn parse_column_indexes(value: &str) -> anyhow::Result<Vec<usize>> {
    let indexes = value
        .split(',')
        .filter(|col| !col.is_empty())
        .map(|col| {
            col.trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid column index: '{col}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    anyhow::ensure!(!indexes.is_empty(), "No column indexes given");
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn test_parse_column_indexes() {
        assert_eq!(parse_column_indexes("0,2").unwrap(), [0, 2]);
        assert_eq!(parse_column_indexes("0,,2,").unwrap(), [0, 2]);
        assert_eq!(parse_column_indexes("3, 1").unwrap(), [3, 1]);
        assert!(parse_column_indexes("").is_err());
        assert!(parse_column_indexes("a").is_err());
        assert!(parse_column_indexes("-1").is_err());
    }
}
