//! Two-pass regression over a complete sample set.

use super::{fit_from_moments, RegressionOutcome};
use crate::selector::NormalizedSample;

/// Fit a line over `samples` by recomputing means and sums from scratch.
///
/// Used as the reference the incremental estimator is checked against, and
/// for one-off fits where no running state exists.
pub fn batch_fit(samples: &[NormalizedSample]) -> RegressionOutcome {
    let Some(first) = samples.first() else {
        return RegressionOutcome::Degenerate;
    };
    // A float mean of identical values need not equal them exactly, which
    // would leave a tiny non-zero Σ(p - p̄)². Detect the collapse directly.
    if samples.iter().all(|s| s.percent == first.percent) {
        return RegressionOutcome::Degenerate;
    }

    let n = samples.len() as f64;
    let mean_percent = samples.iter().map(|s| s.percent).sum::<f64>() / n;
    let mean_score = samples.iter().map(|s| s.score).sum::<f64>() / n;

    let (mut sum_cross, mut sum_var_percent, mut sum_var_score) = (0.0, 0.0, 0.0);
    for s in samples {
        let dp = s.percent - mean_percent;
        let ds = s.score - mean_score;
        sum_cross += dp * ds;
        sum_var_percent += dp * dp;
        sum_var_score += ds * ds;
    }

    fit_from_moments(
        samples.len(),
        mean_percent,
        mean_score,
        sum_cross,
        sum_var_percent,
        sum_var_score,
    )
}
