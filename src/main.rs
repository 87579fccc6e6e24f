mod commands;
mod config;
mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use sheetcal_core::Outcome;

use commands::convert::ConvertRequest;
use config::Overrides;

/// Exit status when only some rows were written.
const PARTIAL_EXIT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "sheetcal")]
#[command(about = "Turn spreadsheet rows into .ics files with Apple Calendar travel-time alerts")]
struct Cli {
    /// Config file (defaults to ~/.config/sheetcal/config.toml)
    #[arg(long, global = true, env = "SHEETCAL_CONFIG")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one .ics file per spreadsheet row
    Convert {
        /// Spreadsheet to read (.xlsx, .xls, .ods, .csv, .tsv)
        input: PathBuf,

        /// Directory where .ics files are written
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// IANA timezone of the times in the sheet (e.g., "Europe/Berlin")
        #[arg(short, long)]
        timezone: Option<String>,

        /// Minutes before start to trigger the travel alert
        #[arg(short, long, allow_negative_numbers = true)]
        alert_minutes: Option<i64>,

        /// Travel time shown by Apple Calendar, in minutes
        #[arg(long, allow_negative_numbers = true)]
        travel_minutes: Option<i64>,

        /// Worksheet to read (defaults to the first one)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Parse and render every row without writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Create a commented config file with the defaults
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{} {:#}", "warning:".yellow(), e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            timezone,
            alert_minutes,
            travel_minutes,
            sheet,
            dry_run,
        } => {
            let request = ConvertRequest {
                input,
                config_file: cli.config,
                overrides: Overrides {
                    output_directory: output,
                    timezone,
                    alert_minutes,
                    travel_minutes,
                    sheet,
                },
                dry_run,
            };
            let outcome = commands::convert::run(request)?;
            Ok(exit_code(outcome))
        }
        Commands::InitConfig => {
            commands::init_config::run(cli.config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Complete => ExitCode::SUCCESS,
        Outcome::Partial => ExitCode::from(PARTIAL_EXIT),
        Outcome::Failed => ExitCode::FAILURE,
    }
}
