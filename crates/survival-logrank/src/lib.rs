//! Two-sample log-rank test for left-censored samples
//!
//! The test compares the event counts of two samples against the counts
//! expected if both came from one population. Two variance estimators are
//! available:
//!
//! - [`LogRankEstimator::Mantel`]: hypergeometric variance of the first
//!   sample's excess events
//! - [`LogRankEstimator::Pike`]: sum of squared excess over expected events
//!   for both samples (default)
//!
//! The statistic is referred to a chi-squared distribution with one degree of
//! freedom.
//!
//! # Examples
//!
//! ```rust
//! use survival_logrank::{log_rank_test, LogRankEstimator};
//!
//! let estimator: LogRankEstimator = "mantel".parse().unwrap();
//! let result = log_rank_test(
//!     &[1.0, 2.0, 3.0, 4.0, 5.0], &[0, 0, 1, 0, 0],
//!     &[2.0, 3.0, 5.0, 6.0, 7.0, 8.0], &[0, 1, 0, 0, 1, 0],
//!     estimator,
//! ).unwrap();
//!
//! println!("{result}");
//! ```

mod logrank;
mod types;

// Re-exports
pub use logrank::{log_rank_test, LogRankTest};
pub use types::{LogRankEstimator, LogRankResult};
