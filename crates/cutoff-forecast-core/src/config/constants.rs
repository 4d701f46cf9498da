//! Centralized forecasting constants.
//!
//! Every threshold the engine uses by default lives here so tests, config
//! defaults, and documentation agree on a single value.

/// Window selection margins.
pub mod window {
    /// Observations closer than this to the event start are discarded (12 h).
    pub const MIN_GAP_FROM_START_MS: u64 = 12 * 60 * 60 * 1000;

    /// Observations at or after `end_ts - MIN_GAP_BEFORE_END_MS` are
    /// discarded (24 h).
    pub const MIN_GAP_BEFORE_END_MS: u64 = 24 * 60 * 60 * 1000;
}

/// Regression thresholds.
pub mod regression {
    /// Minimum eligible prefix length before a forecast point is emitted.
    pub const MIN_SAMPLES: usize = 5;

    /// Smallest `min_samples` a configuration may ask for. A line needs two
    /// distinct points.
    pub const MIN_SAMPLES_FLOOR: usize = 2;
}

/// Data source conventions of the public tracker API.
pub mod source {
    /// Server index used when none is configured (CN).
    pub const DEFAULT_SERVER: usize = 3;

    /// Number of server slots in per-server metadata arrays.
    pub const SERVER_SLOTS: usize = 5;

    /// Tiers the tracker publishes cutoffs for.
    pub const DEFAULT_TIERS: &[u32] = &[
        20, 30, 40, 50, 100, 200, 300, 400, 500, 1000, 2000, 3000, 4000, 5000, 10000, 20000, 30000,
        50000,
    ];

    /// Event whose CN schedule anchors the derived schedule of later events.
    pub const SCHEDULE_ANCHOR_EVENT: u32 = 170;

    /// Start of the anchor event (ms since epoch).
    pub const SCHEDULE_ANCHOR_START_MS: i64 = 1_662_440_400_000;

    /// End of the anchor event (ms since epoch).
    pub const SCHEDULE_ANCHOR_END_MS: i64 = 1_663_081_140_000;

    /// Cadence between consecutive events from the anchor onward (9 days).
    pub const SCHEDULE_CADENCE_MS: i64 = 9 * 24 * 60 * 60 * 1000;
}
