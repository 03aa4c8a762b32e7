//! Two-sample log-rank test
//!
//! Both samples are compared on the sorted union of their values. At each grid
//! point `g` a sample's risk set is the number of its values below `g` and its
//! event count is the number of its uncensored values below `g`. Grid points
//! where a ratio is undefined (an empty risk set, or a single-member risk set
//! for the variance) produce NaN terms, which every sum skips.

use crate::types::{LogRankEstimator, LogRankResult};
use survival_core::math::{self, distributions::chi_squared};
use survival_core::{CensorIndicator, Result, Sample};
use tracing::{debug, instrument, warn};

/// Per-grid-point observed-minus-expected counts and variances
#[derive(Debug, Default)]
struct RiskTable {
    deviation1: Vec<f64>,
    deviation2: Vec<f64>,
    expected1: Vec<f64>,
    expected2: Vec<f64>,
    variance: Vec<f64>,
}

impl RiskTable {
    fn build(sample1: &Sample, sample2: &Sample) -> Self {
        let all1 = math::sorted(sample1.values());
        let all2 = math::sorted(sample2.values());
        let events1 = math::sorted(&sample1.events());
        let events2 = math::sorted(&sample2.events());

        let mut grid = Vec::with_capacity(all1.len() + all2.len());
        grid.extend_from_slice(&all1);
        grid.extend_from_slice(&all2);
        let grid = math::sorted(&grid);

        let mut table = Self::default();
        for &g in &grid {
            let y1 = math::count_below(&all1, g) as f64;
            let y2 = math::count_below(&all2, g) as f64;
            let d1 = math::count_below(&events1, g) as f64;
            let d2 = math::count_below(&events2, g) as f64;
            let y = y1 + y2;
            let d = d1 + d2;

            let e1 = d * y1 / y;
            let e2 = d * y2 / y;
            table.deviation1.push(d1 - e1);
            table.deviation2.push(d2 - e2);
            table.expected1.push(e1);
            table.expected2.push(e2);
            table.variance.push(y1 * y2 * d * (y - d) / (y * y * (y - 1.0)));
        }
        table
    }

    fn undefined_points(&self) -> usize {
        self.deviation1.iter().filter(|v| v.is_nan()).count()
    }

    fn statistic(&self, estimator: LogRankEstimator) -> f64 {
        let excess1 = math::nan_sum(self.deviation1.iter().copied());
        match estimator {
            LogRankEstimator::Mantel => {
                excess1 * excess1 / math::nan_sum(self.variance.iter().copied())
            }
            LogRankEstimator::Pike => {
                let excess2 = math::nan_sum(self.deviation2.iter().copied());
                let term1 = excess1 * excess1 / math::nan_sum(self.expected1.iter().copied());
                let term2 = excess2 * excess2 / math::nan_sum(self.expected2.iter().copied());
                // An arm without expected events contributes 0/0
                math::nan_sum([term1, term2])
            }
        }
    }

    fn max_deviation(&self) -> f64 {
        math::nan_max(self.deviation1.iter().copied()).abs()
    }
}

/// Log-rank test between two censored samples
///
/// # Example
/// ```rust
/// use survival_core::Sample;
/// use survival_logrank::{LogRankEstimator, LogRankTest};
///
/// let a = Sample::new(&[1.0, 2.0, 3.0, 4.0], &[0, 0, 0, 0]).unwrap();
/// let b = Sample::new(&[5.0, 6.0, 7.0, 8.0], &[1, 1, 1, 1]).unwrap();
///
/// let result = LogRankTest::new(LogRankEstimator::Pike).test(&a, &b);
/// assert!(result.is_significant(0.05));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRankTest {
    estimator: LogRankEstimator,
}

impl LogRankTest {
    /// Create a test using `estimator`
    pub fn new(estimator: LogRankEstimator) -> Self {
        Self { estimator }
    }

    /// Get the estimator
    pub fn estimator(&self) -> LogRankEstimator {
        self.estimator
    }

    /// Compare two samples
    ///
    /// Undefined statistics (no variance at all) give a NaN statistic and
    /// p-value rather than an error.
    #[instrument(skip(self, sample1, sample2), fields(
        estimator = %self.estimator,
        n1 = sample1.len(),
        n2 = sample2.len()
    ))]
    pub fn test(&self, sample1: &Sample, sample2: &Sample) -> LogRankResult {
        let table = RiskTable::build(sample1, sample2);

        let statistic = self.statistic_or_nan(&table);
        let max_deviation = table.max_deviation();
        let p_value = chi_squared::sf(statistic, 1.0);

        debug!(
            grid_points = table.deviation1.len(),
            undefined = table.undefined_points(),
            statistic,
            p_value,
            "log-rank test complete"
        );

        LogRankResult {
            max_deviation,
            statistic,
            p_value,
            estimator: self.estimator,
        }
    }

    fn statistic_or_nan(&self, table: &RiskTable) -> f64 {
        let statistic = table.statistic(self.estimator);
        if statistic.is_nan() {
            warn!(estimator = %self.estimator, "log-rank statistic undefined: no variance between samples");
        }
        statistic
    }
}

/// Log-rank test on raw value and flag slices
///
/// # Errors
/// Returns an error if either sample is empty, has mismatched lengths or
/// contains non-finite values.
pub fn log_rank_test<C1, C2>(
    values1: &[f64],
    censored1: &[C1],
    values2: &[f64],
    censored2: &[C2],
    estimator: LogRankEstimator,
) -> Result<LogRankResult>
where
    C1: CensorIndicator,
    C2: CensorIndicator,
{
    let sample1 = Sample::new(values1, censored1)?;
    let sample2 = Sample::new(values2, censored2)?;
    Ok(LogRankTest::new(estimator).test(&sample1, &sample2))
}
