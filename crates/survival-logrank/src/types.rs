//! Types for log-rank test configuration and results

use std::fmt;
use std::str::FromStr;
use survival_core::Error;

/// Variance estimator used to form the log-rank statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogRankEstimator {
    /// Hypergeometric variance: `T = (Σ(d1 - E1))² / ΣV`
    Mantel,
    /// Expected-count approximation: `T = Σ_k (Σ(d_k - E_k))² / ΣE_k`
    #[default]
    Pike,
}

impl LogRankEstimator {
    /// Get the name of the estimator
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mantel => "mantel",
            Self::Pike => "pike",
        }
    }
}

impl FromStr for LogRankEstimator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mantel" => Ok(Self::Mantel),
            "pike" => Ok(Self::Pike),
            _ => Err(Error::unknown_option("Estimator", s, &["mantel", "pike"])),
        }
    }
}

impl fmt::Display for LogRankEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a two-sample log-rank test
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogRankResult {
    /// Largest observed-minus-expected event count of the first sample, in
    /// absolute value
    pub max_deviation: f64,
    /// Chi-squared statistic with one degree of freedom
    pub statistic: f64,
    /// Probability of a statistic at least this large under the null
    pub p_value: f64,
    /// Estimator the statistic was formed with
    pub estimator: LogRankEstimator,
}

impl LogRankResult {
    /// Whether the samples differ at significance level `alpha`
    ///
    /// A NaN p-value is never significant.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for LogRankResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "log-rank ({}): T = {:.4}, p = {:.4}, D = {:.4}",
            self.estimator, self.statistic, self.p_value, self.max_deviation
        )
    }
}
