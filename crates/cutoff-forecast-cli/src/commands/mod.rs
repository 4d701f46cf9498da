//! CLI command handlers
//!
//! # Modules
//!
//! - `predict`: One (event, tier) forecast, text or JSON
//! - `batch`: Several tiers of one event in parallel

pub mod batch;
pub mod predict;

use std::path::{Path, PathBuf};

use clap::Args;
use cutoff_forecast_core::{DataSource, EventInfo, ForecastConfig, ObservationStore, Result};
use tracing::debug;

/// Arguments shared by every command.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory holding events.json, rates.json and tracker/<event>-<tier>.json
    #[arg(long, env = "CUTOFF_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Optional TOML configuration file
    #[arg(long, env = "CUTOFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Event id
    #[arg(long)]
    pub event: u32,
}

/// Load configuration from `path` (or defaults) and apply `CUTOFF_*`
/// overrides. Validation happens in `ForecastEngine::new`.
pub fn load_config(path: Option<&Path>) -> Result<ForecastConfig> {
    let config = match path {
        Some(path) => ForecastConfig::from_file(path)?,
        None => ForecastConfig::default(),
    }
    .with_env_overrides();
    debug!(?config, "Configuration loaded");
    Ok(config)
}

/// Data source that answers every rate query with a fixed rate.
pub struct RateOverride<'a> {
    inner: &'a dyn DataSource,
    rate: f64,
}

impl<'a> RateOverride<'a> {
    pub fn new(inner: &'a dyn DataSource, rate: f64) -> Self {
        Self { inner, rate }
    }
}

impl DataSource for RateOverride<'_> {
    fn event(&self, event_id: u32) -> Result<EventInfo> {
        self.inner.event(event_id)
    }

    fn observations(&self, event_id: u32, tier: u32) -> Result<ObservationStore> {
        self.inner.observations(event_id, tier)
    }

    fn rate(&self, _server: usize, _tier: u32, _event_type: &str) -> Result<Option<f64>> {
        Ok(Some(self.rate))
    }
}
