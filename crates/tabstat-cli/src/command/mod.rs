use clap::{Parser, Subcommand};

use self::{
    project::{ExtractArg, FilterArg},
    summary::SummaryArg,
};

mod project;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print min, max, mean and standard deviation of every column
    Summary(#[clap(flatten)] SummaryArg),
    /// Select columns from delimited input, skipping its header row
    Extract(#[clap(flatten)] ExtractArg),
    /// Select columns from comma-separated input, header row included
    Filter(#[clap(flatten)] FilterArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Extract(arg) => project::run_extract(&arg)?,
        Mode::Filter(arg) => project::run_filter(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_summary_arguments() {
        let args = CommandArgs::try_parse_from([
            "tabstat",
            "summary",
            "--suppress",
            "--plot",
            "--delimiter",
            ";",
            "--max-rows",
            "10",
            "--format",
            "json",
        ])
        .unwrap();
        let Mode::Summary(arg) = args.mode else {
            panic!("expected summary mode");
        };
        let options = arg.options();
        assert!(options.suppress_warnings);
        assert!(options.plot);
        assert_eq!(options.delimiter, b';');
        assert_eq!(options.max_rows, Some(10));
    }

    #[test]
    fn test_parse_extract_arguments() {
        let args = CommandArgs::try_parse_from([
            "tabstat",
            "extract",
            "--cols",
            "2,0",
            "--skip-header",
            "false",
        ])
        .unwrap();
        assert!(matches!(args.mode, Mode::Extract(_)));
    }

    #[test]
    fn test_rejects_bad_delimiter() {
        let result = CommandArgs::try_parse_from(["tabstat", "summary", "--delimiter", "::"]);
        assert!(result.is_err());
    }
}
