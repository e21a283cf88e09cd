//! Purple Headers CLI - fill a row of formulas down a CSV sheet

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use purple_headers::prelude::*;
use purple_headers::CsvWriter;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "purple")]
#[command(
    author,
    version,
    about = "Copy a row of formulas down to the end of the data"
)]
struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG is used otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill only the blank rows below the selection column's existing content
    Append {
        #[command(flatten)]
        fill: FillArgs,
    },

    /// Overwrite every row below the selection
    ReplaceAll {
        #[command(flatten)]
        fill: FillArgs,

        /// Fail unless every selected cell has a formula
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct FillArgs {
    /// Input CSV file
    input: PathBuf,

    /// The single row of formulas to copy, e.g. B5:C5
    #[arg(short, long)]
    selection: String,

    /// Output CSV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the first line as data instead of a header
    #[arg(long)]
    no_header: bool,

    /// Field delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Append { fill } => run(&fill, "Append", |sheet| sheet.append()),
        Commands::ReplaceAll { fill, strict } => {
            let options = FillOptions {
                require_formulas: strict,
            };
            run(&fill, "Replace All", |sheet| {
                sheet.replace_all_with_options(&options)
            })
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<F>(args: &FillArgs, command: &str, fill: F) -> Result<()>
where
    F: FnOnce(&mut Worksheet) -> purple_headers::Result<FillStats>,
{
    let delimiter = delimiter_byte(args.delimiter)?;
    let read_options = CsvReadOptions {
        delimiter,
        has_header: !args.no_header,
        ..Default::default()
    };

    let mut sheet = Worksheet::open(&args.input, &read_options)
        .with_context(|| format!("Failed to open '{}'", args.input.display()))?;

    sheet
        .select(&args.selection)
        .with_context(|| format!("Invalid selection '{}'", args.selection))?;

    let stats = fill(&mut sheet).with_context(|| format!("{} failed", command))?;
    report(&stats);

    let write_options = CsvWriteOptions {
        delimiter,
        ..Default::default()
    };
    write_output(&sheet, args.output.as_deref(), &write_options)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn report(stats: &FillStats) {
    if stats.is_empty() {
        eprintln!("Nothing to fill");
        return;
    }

    let last_row = stats.start_row + stats.rows_filled;
    eprintln!(
        "Filled rows {}-{} ({} formula columns, {} cells restyled)",
        stats.start_row + 1,
        last_row,
        stats.columns_copied.len(),
        stats.cells_cleared
    );
}

fn write_output(sheet: &Worksheet, output: Option<&Path>, options: &CsvWriteOptions) -> Result<()> {
    match output {
        Some(path) => sheet
            .save(path, options)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => CsvWriter::write(sheet, io::stdout().lock(), options)
            .context("Failed to write to stdout"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replace_all() {
        let cli = Cli::try_parse_from([
            "purple",
            "-vv",
            "replace-all",
            "data.csv",
            "--selection",
            "B5:C5",
            "--strict",
            "-o",
            "out.csv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::ReplaceAll { fill, strict } => {
                assert!(strict);
                assert_eq!(fill.selection, "B5:C5");
                assert_eq!(fill.output, Some(PathBuf::from("out.csv")));
                assert!(!fill.no_header);
            }
            Commands::Append { .. } => panic!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn test_selection_is_required() {
        assert!(Cli::try_parse_from(["purple", "append", "data.csv"]).is_err());
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert!(delimiter_byte('é').is_err());
    }
}
