//! Simple linear regression of score against normalized event time.
//!
//! ```text
//! slope       = Σ(pᵢ - p̄)(sᵢ - s̄) / Σ(pᵢ - p̄)²
//! intercept   = s̄ - slope × p̄
//! correlation = slope × σ(p) / σ(s)        (population σ, divide by n)
//! ```
//!
//! [`RunningRegression`] maintains the sums incrementally (Welford/West
//! co-moment update, O(1) per sample). [`batch_fit`] recomputes from scratch
//! with two passes. Both agree within floating-point tolerance and both report
//! [`RegressionOutcome::Degenerate`] when every percent in the set is equal.

mod batch;
mod running;


pub use batch::batch_fit;
pub use running::RunningRegression;

use serde::{Deserialize, Serialize};

/// A fitted regression line over one eligible prefix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// Score gained per unit of normalized time
    pub slope: f64,
    /// Regression line value at percent = 0
    pub intercept: f64,
    /// Pearson correlation coefficient. Diagnostic only, never gates a
    /// forecast. `None` when every score in the prefix is equal.
    pub correlation: Option<f64>,
    /// Number of samples the line was fitted on
    pub count: usize,
}

impl RegressionFit {
    /// Value of the regression line at `percent`.
    #[inline]
    pub fn evaluate(&self, percent: f64) -> f64 {
        self.intercept + self.slope * percent
    }

    /// Coefficient of determination (`correlation²`).
    pub fn r_squared(&self) -> Option<f64> {
        self.correlation.map(|r| r * r)
    }
}

/// Result of fitting a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegressionOutcome {
    /// A well-defined line
    Fit(RegressionFit),
    /// Zero variance in percent (fewer than two distinct time points); the
    /// slope is undefined
    Degenerate,
}

impl RegressionOutcome {
    /// The fit, if the regression is well-defined.
    pub fn fit(self) -> Option<RegressionFit> {
        match self {
            Self::Fit(fit) => Some(fit),
            Self::Degenerate => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

/// Shared tail of both estimators: turn sufficient statistics into a fit.
pub(crate) fn fit_from_moments(
    count: usize,
    mean_percent: f64,
    mean_score: f64,
    sum_cross: f64,
    sum_var_percent: f64,
    sum_var_score: f64,
) -> RegressionOutcome {
    let spread = sum_var_percent.is_finite() && sum_var_percent > 0.0;
    if count < 2 || !spread {
        return RegressionOutcome::Degenerate;
    }

    let slope = sum_cross / sum_var_percent;
    let intercept = mean_score - slope * mean_percent;

    let n = count as f64;
    let sd_percent = (sum_var_percent / n).sqrt();
    let sd_score = (sum_var_score / n).sqrt();
    let correlation = (sd_score > 0.0).then(|| slope * sd_percent / sd_score);

    RegressionOutcome::Fit(RegressionFit {
        slope,
        intercept,
        correlation,
        count,
    })
}
