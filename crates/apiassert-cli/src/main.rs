//! apiassert CLI
//!
//! Command-line interface for structural JSON assertions

use apiassert_core::logging_facility::Profile;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "apiassert")]
#[command(about = "apiassert - Structural assertions for JSON API responses", long_about = None)]
struct Cli {
    /// Logging profile: development, production or test
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two JSON documents
    Compare(commands::compare::CompareArgs),
    /// Run a test case from a suite's case file
    Run(commands::run::RunArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args, cli.log_profile),
        Commands::Run(args) => commands::run::execute(args, cli.log_profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
