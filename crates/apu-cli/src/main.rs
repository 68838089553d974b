mod commands;
mod logging;
mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use apu_core::extraction::layout::CellSplit;
use logging::{init_logging, LogConfig, LogFormat};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "apu",
    version,
    about = "Extract unit price analysis cards and price lists from quotations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,
}

/// Profile selection shared by the flat commands.
#[derive(Args)]
struct ProfileArgs {
    /// Predefined profile: standard (default) or extended
    #[arg(short, long = "preset", value_name = "NAME")]
    preset: Option<String>,

    /// Custom JSON profile file
    #[arg(long = "profile", value_name = "FILE", conflicts_with = "preset")]
    profile: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild unit price analysis cards from PDF, spreadsheet or CSV files
    Cards {
        /// Input files (.pdf, .xlsx, .xls, .ods, .csv, .tsv)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Write the card table to a CSV file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Append to an existing card table instead of overwriting it
        #[arg(long, requires = "out")]
        append: bool,

        /// How PDF text lines are cut into cells: whitespace or gaps
        #[arg(long, default_value = "gaps", value_parser = parse_split)]
        split: CellSplit,

        /// Worksheet to read (first sheet by default)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,
    },
    /// Extract a plain price list (code, description, unit, price)
    Flat {
        /// Input files (.pdf, .xlsx, .xls, .ods, .csv, .tsv)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Manual column mapping, e.g. code=0,description=1,unit=2,price=5
        #[arg(short, long = "map", value_name = "MAPPING")]
        map: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Write the records to a CSV file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// How PDF text lines are cut into cells: whitespace or gaps
        #[arg(long, default_value = "gaps", value_parser = parse_split)]
        split: CellSplit,

        /// Worksheet to read (first sheet by default)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,
    },
    /// Show the detected price list header row
    Headers {
        /// Input file
        input: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// How PDF text lines are cut into cells: whitespace or gaps
        #[arg(long, default_value = "gaps", value_parser = parse_split)]
        split: CellSplit,

        /// Worksheet to read (first sheet by default)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,
    },
    /// Manage and inspect flat extraction profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Print a predefined profile as JSON
    Show {
        /// Preset name (e.g., "standard")
        preset: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn parse_split(s: &str) -> Result<CellSplit, String> {
    CellSplit::from_str_loose(s).ok_or_else(|| format!("unknown split mode '{s}' (whitespace, gaps)"))
}

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_flags(cli.verbose, cli.quiet).with_format(cli.log_format));

    let result = match cli.command {
        Commands::Cards {
            inputs,
            output,
            out,
            append,
            split,
            sheet,
        } => commands::cards::run(
            &inputs,
            output,
            out.as_deref(),
            append,
            &commands::source_options(split, sheet),
        ),
        Commands::Flat {
            inputs,
            profile,
            map,
            output,
            out,
            split,
            sheet,
        } => commands::flat::run(
            &inputs,
            profile.preset.as_deref(),
            profile.profile.as_deref(),
            map.as_deref(),
            output,
            out.as_deref(),
            &commands::source_options(split, sheet),
        ),
        Commands::Headers {
            input,
            profile,
            split,
            sheet,
        } => commands::headers::run(
            &input,
            profile.preset.as_deref(),
            profile.profile.as_deref(),
            &commands::source_options(split, sheet),
        ),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Show { preset } => commands::profiles::show(&preset),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_for(args: &[&str]) -> CellSplit {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Cards { split, .. }
            | Commands::Flat { split, .. }
            | Commands::Headers { split, .. } => split,
            Commands::Profiles { .. } => panic!("no split option"),
        }
    }

    #[test]
    fn test_layout_text_split_on_gaps_by_default() {
        assert_eq!(split_for(&["apu", "cards", "cotizacion.pdf"]), CellSplit::Gaps);
        assert_eq!(split_for(&["apu", "flat", "lista.pdf"]), CellSplit::Gaps);
        assert_eq!(split_for(&["apu", "headers", "lista.pdf"]), CellSplit::Gaps);
        assert_eq!(
            split_for(&["apu", "cards", "--split", "whitespace", "cotizacion.pdf"]),
            CellSplit::Whitespace
        );
    }
}
