//! `batch` command: forecasts for several tiers of one event.
//!
//! Tiers are forecast in parallel; output keeps the order given on the
//! command line, one line per tier. A failing tier is reported on its line
//! and does not stop the others. The exit code is the most severe outcome.

use clap::Args;
use cutoff_forecast_core::{
    ForecastEngine, ForecastError, ForecastReport, ForecastRequest, JsonDirectorySource,
};
use tracing::{debug, info};

use super::{load_config, SourceArgs};
use crate::error::{worst, CliExitCode};

/// Arguments for the `batch` command
#[derive(Args, Debug)]
pub struct BatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Comma-separated tiers, e.g. `100,1000,2000`
    #[arg(long, value_delimiter = ',', required = true)]
    pub tiers: Vec<u32>,
}

/// Execute the batch command.
pub fn batch_command(args: BatchArgs) -> CliExitCode {
    debug!(?args, "batch_command");

    let engine = match load_config(args.source.config.as_deref()).and_then(ForecastEngine::new) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            return CliExitCode::from(&e);
        }
    };

    let source = JsonDirectorySource::new(&args.source.data_dir);
    let requests: Vec<ForecastRequest> = args
        .tiers
        .iter()
        .map(|&tier| ForecastRequest::new(args.source.event, tier))
        .collect();

    let results = engine.run_many(&source, &requests);
    info!(requests = results.len(), "Batch forecast complete");

    let mut codes = Vec::with_capacity(results.len());
    for (request, result) in &results {
        println!("{}", render_line(request, result));
        codes.push(match result {
            Ok(_) => CliExitCode::Success,
            Err(e) => CliExitCode::from(e),
        });
    }
    worst(codes)
}

/// One output line for one tier.
pub fn render_line(
    request: &ForecastRequest,
    result: &Result<ForecastReport, ForecastError>,
) -> String {
    match result {
        Ok(report) => match report.summary.final_prediction() {
            Some(predicted) => format!(
                "tier {}: {} ({} samples)",
                request.tier, predicted, report.summary.sample_count
            ),
            None => format!(
                "tier {}: insufficient data ({} samples)",
                request.tier, report.summary.sample_count
            ),
        },
        Err(e) => format!("tier {}: error: {}", request.tier, e),
    }
}
