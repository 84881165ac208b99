//! Folio CLI - rich-content fragment pipeline.
//!
//! Provides commands for:
//! - `parse`: Assemble one post and print its fragments as JSON
//! - `check`: Assemble every post in the source directory and report warnings
//! - `fence`: Print insertable chart, playground and gallery markup

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FenceCommand, ParseArgs};
use output::Output;

/// Folio - rich-content fragment pipeline.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble one post and print its fragments as JSON.
    Parse(ParseArgs),
    /// Assemble every post and report warnings.
    Check(CheckArgs),
    /// Print insertable content markup.
    #[command(subcommand)]
    Fence(FenceCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Parse(args) => args.verbose,
        Commands::Check(args) => args.verbose,
        Commands::Fence(_) => false,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Fence(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
