//! Cutoff Forecast CLI
//!
//! Reads tracker, rate, and event payloads from a data directory and prints
//! cutoff forecasts.
//!
//! # Commands
//!
//! - `predict`: Latest cutoff and forecast for one (event, tier)
//! - `batch`: Forecasts for several tiers of one event, computed in parallel
//!
//! # Exit Codes
//! - 0: Success, including "insufficient data"
//! - 1: Recoverable error (missing or unreadable payloads)
//! - 2: Invalid input (bad config, untracked tier, inverted event window)

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

pub use error::CliExitCode;

/// Cutoff Forecast CLI - rank cutoff forecasting from tracker snapshots
#[derive(Parser)]
#[command(name = "cutoff-forecast")]
#[command(version)]
#[command(about = "Forecast final ranking cutoffs from observed tracker data")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast one tier of one event
    Predict(commands::predict::PredictArgs),
    /// Forecast several tiers of one event in parallel
    Batch(commands::batch::BatchArgs),
}

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Predict(args) => commands::predict::predict_command(args),
        Commands::Batch(args) => commands::batch::batch_command(args),
    };

    std::process::exit(exit_code.into());
}
