//! Result type for resampled curve values

use crate::config::{LOWER_PERCENTILE, MEDIAN_PERCENTILE, UPPER_PERCENTILE};
use std::fmt;
use survival_core::{math, Error, Result};

/// Percentile summary of resampled survival probabilities at one query point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceEstimate {
    /// Median of the resampled probabilities
    pub median: f64,
    /// `median - p15.87`
    pub err_low: f64,
    /// `p84.13 - median`
    pub err_high: f64,
    /// Number of trials the summary was built from
    pub n_samples: usize,
}

impl VarianceEstimate {
    /// Summarize trial values by their 15.87 / 50 / 84.13 percentiles
    ///
    /// # Errors
    /// [`Error::InsufficientData`] if `trials` is empty.
    pub fn from_trials(trials: &[f64]) -> Result<Self> {
        if trials.is_empty() {
            return Err(Error::empty_input("variance summary"));
        }

        let sorted = math::sorted(trials);
        let low = math::quantile_sorted(&sorted, LOWER_PERCENTILE);
        let median = math::quantile_sorted(&sorted, MEDIAN_PERCENTILE);
        let high = math::quantile_sorted(&sorted, UPPER_PERCENTILE);

        Ok(Self {
            median,
            err_low: median - low,
            err_high: high - median,
            n_samples: trials.len(),
        })
    }

    /// `(median - err_low, median + err_high)`
    pub fn interval(&self) -> (f64, f64) {
        (self.median - self.err_low, self.median + self.err_high)
    }
}

impl fmt::Display for VarianceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} (-{:.4} / +{:.4}, {} trials)",
            self.median, self.err_low, self.err_high, self.n_samples
        )
    }
}
