//! `predict` command: latest cutoff and forecast for one (event, tier).
//!
//! # Output (text)
//!
//! ```text
//! Sample Event (event 170, tier 100)
//! Latest cutoff: 10000 (3h 12m ago)
//! Forecast: 15000 (6 samples, rate 0.1)
//! ```
//!
//! With fewer eligible samples than the configured threshold the forecast
//! line reads `Forecast: insufficient data (2 of 5 samples)` and the command
//! still exits 0.

use chrono::{DateTime, Utc};
use clap::Args;
use cutoff_forecast_core::{
    format_elapsed, DataSource, ForecastEngine, ForecastReport, ForecastRequest,
    JsonDirectorySource,
};
use tracing::debug;

use super::{load_config, RateOverride, SourceArgs};
use crate::error::CliExitCode;

/// Arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Tier to forecast
    #[arg(long)]
    pub tier: u32,

    /// Calibration rate to use instead of the one in rates.json
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full report, including the forecast curve
    Json,
}

/// Execute the predict command.
pub fn predict_command(args: PredictArgs) -> CliExitCode {
    debug!(?args, "predict_command");

    let engine = match load_config(args.source.config.as_deref()).and_then(ForecastEngine::new) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            return CliExitCode::from(&e);
        }
    };

    let directory = JsonDirectorySource::new(&args.source.data_dir);
    let overridden;
    let source: &dyn DataSource = match args.rate {
        Some(rate) => {
            overridden = RateOverride::new(&directory, rate);
            &overridden
        }
        None => &directory,
    };

    let request = ForecastRequest::new(args.source.event, args.tier);
    let report = match engine.run_request(source, request) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {}", e);
            return CliExitCode::from(&e);
        }
    };

    match args.format {
        OutputFormat::Text => {
            print!("{}", render_text(&report, engine.config().min_samples, Utc::now()));
            CliExitCode::Success
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                CliExitCode::Success
            }
            Err(e) => {
                eprintln!("error: failed to serialize report: {}", e);
                CliExitCode::Warning
            }
        },
    }
}

/// Render the text summary of `report` as seen at `now`.
pub fn render_text(report: &ForecastReport, min_samples: usize, now: DateTime<Utc>) -> String {
    let summary = &report.summary;
    let mut out = format!(
        "{} (event {}, tier {})\n",
        report.event_name, report.request.event_id, report.request.tier
    );

    match (summary.latest_observation, summary.staleness_at(now)) {
        (Some(latest), Some(age)) => out.push_str(&format!(
            "Latest cutoff: {} ({} ago)\n",
            latest.score,
            format_elapsed(age)
        )),
        _ => out.push_str("Latest cutoff: none\n"),
    }

    match summary.final_prediction() {
        Some(predicted) => out.push_str(&format!(
            "Forecast: {} ({} samples, rate {})\n",
            predicted, summary.sample_count, report.forecast.rate
        )),
        None => out.push_str(&format!(
            "Forecast: insufficient data ({} of {} samples)\n",
            summary.sample_count, min_samples
        )),
    }
    out
}
