//! Incremental regression state.

use super::{fit_from_moments, RegressionOutcome};
use crate::selector::NormalizedSample;

/// Running sufficient statistics for a simple linear regression.
///
/// Each [`push`](Self::push) updates means and co-moment sums in O(1):
///
/// ```text
/// dp = p - p̄ₙ₋₁        p̄ₙ = p̄ₙ₋₁ + dp / n
/// ds = s - s̄ₙ₋₁        s̄ₙ = s̄ₙ₋₁ + ds / n
/// Sₚₚ += dp (p - p̄ₙ)   Sₛₛ += ds (s - s̄ₙ)   Sₚₛ += dp (s - s̄ₙ)
/// ```
///
/// Identical percents leave `Sₚₚ` at exactly zero, so the degenerate case is
/// detected without an epsilon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningRegression {
    count: usize,
    mean_percent: f64,
    mean_score: f64,
    sum_cross: f64,
    sum_var_percent: f64,
    sum_var_score: f64,
}

impl RunningRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the statistics.
    pub fn push(&mut self, sample: NormalizedSample) {
        self.count += 1;
        let n = self.count as f64;

        let dp = sample.percent - self.mean_percent;
        self.mean_percent += dp / n;
        let ds = sample.score - self.mean_score;
        self.mean_score += ds / n;

        let score_resid = sample.score - self.mean_score;
        self.sum_var_percent += dp * (sample.percent - self.mean_percent);
        self.sum_var_score += ds * score_resid;
        self.sum_cross += dp * score_resid;
    }

    /// Fit the line over every sample pushed so far.
    pub fn fit(&self) -> RegressionOutcome {
        fit_from_moments(
            self.count,
            self.mean_percent,
            self.mean_score,
            self.sum_cross,
            self.sum_var_percent,
            self.sum_var_score,
        )
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean_percent(&self) -> f64 {
        self.mean_percent
    }

    pub fn mean_score(&self) -> f64 {
        self.mean_score
    }

    /// Forget every sample.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Extend<NormalizedSample> for RunningRegression {
    fn extend<I: IntoIterator<Item = NormalizedSample>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}
