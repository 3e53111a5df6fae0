use std::path::PathBuf;

use anyhow::Context;
use tabstat_summary::{Summary, SummaryOptions};

use crate::{
    plot::{self, SvgPlotter},
    util::{self, Output, StderrWarnings},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    /// Do not print warnings about skipped rows and fields
    #[arg(long)]
    suppress: bool,
    /// Write a histogram SVG for every column
    #[arg(long)]
    plot: bool,
    /// Directory for histogram files (implies --plot)
    #[arg(long)]
    plot_dir: Option<PathBuf>,
    /// Field delimiter, a single ASCII character (`\t` for tab)
    #[arg(long, default_value = ",", value_parser = util::parse_delimiter)]
    delimiter: u8,
    /// Stop after this many data rows
    #[arg(long)]
    max_rows: Option<u64>,
    /// Input file path (stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Report format: table or json
    #[arg(long, default_value = "table")]
    format: ReportFormat,
}

impl SummaryArg {
    pub(crate) fn options(&self) -> SummaryOptions {
        SummaryOptions {
            suppress_warnings: self.suppress,
            plot: self.plot || self.plot_dir.is_some(),
            delimiter: self.delimiter,
            max_rows: self.max_rows,
        }
    }
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let options = arg.options();
    let input = util::open_input(arg.file.as_deref())?;
    let mut warnings = StderrWarnings::default();
    let summary = tabstat_summary::summarize(input, &options, &mut warnings)
        .context("Failed to summarize input")?;
    tracing::debug!(warnings = warnings.count(), "summary complete");

    let mut output = Output::from_output_path(arg.output.clone())?;
    write_report(&summary, arg.format, &mut output)?;
    output.finish()?;

    if options.plot {
        let dir = arg
            .plot_dir
            .clone()
            .unwrap_or_else(|| plot::default_dir().to_owned());
        let mut plotter = SvgPlotter::new(dir);
        let plotted = summary.plot_with(&mut plotter)?;
        tracing::info!(plots = plotted, "wrote plots");
    }
    Ok(())
}

fn write_report(
    summary: &Summary,
    format: ReportFormat,
    output: &mut Output,
) -> anyhow::Result<()> {
    let report = summary.report();
    match format {
        ReportFormat::Table => report
            .write_table(output)
            .with_context(|| format!("Failed to write report to {}", output.display_path())),
        ReportFormat::Json => output.write_json(&report),
    }
}
