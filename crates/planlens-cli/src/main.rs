//! planlens CLI
//!
//! Command-line interface for planlens

use clap::{Parser, Subcommand, ValueEnum};
use planlens_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "planlens")]
#[command(about = "planlens - classify and diff infrastructure change plans", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr; RUST_LOG sets the level)
    #[arg(
        long,
        global = true,
        value_enum,
        env = "PLANLENS_LOG_FORMAT",
        default_value = "text"
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify plan sections, print the report and export per-category files
    Analyse(commands::analyse::AnalyseArgs),
    /// Structural diff of two JSON files
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Analyse(args) => commands::analyse::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
