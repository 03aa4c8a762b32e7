//! Resampling uncertainty for Kaplan-Meier survival probabilities
//!
//! This crate estimates how much a survival probability read off a
//! Kaplan-Meier curve varies under resampling:
//!
//! - **Bootstrap**: observations are drawn with replacement, each keeping its
//!   own censoring flag
//! - **Monte Carlo**: every value is replaced with a draw from a normal
//!   distribution centred on it, using per-observation measurement errors
//!
//! The result is summarized by the 15.87 / 50 / 84.13 percentiles of the trial
//! values, the one-sigma points of a normal distribution.
//!
//! # Examples
//!
//! ```rust
//! use survival_core::Sample;
//! use survival_variance::{ResamplingMethod, VarianceEstimator};
//!
//! let sample = Sample::new(&[0.8, 1.4, 2.1, 2.9, 3.3, 4.0], &[0, 1, 0, 0, 1, 0]).unwrap();
//! let errors = [0.1, 0.1, 0.2, 0.2, 0.1, 0.3];
//!
//! let method: ResamplingMethod = "monte carlo".parse().unwrap();
//! let estimate = VarianceEstimator::new(method)
//!     .with_samples(500)
//!     .with_seed(42)
//!     .estimate(2.5, &sample, Some(&errors))
//!     .unwrap();
//!
//! println!("S(2.5) = {estimate}");
//! ```
//!
//! Trials can run on a rayon pool with the `parallel` feature; a fixed seed
//! gives the same result on either engine.

pub mod config;
mod resampling;
mod types;

// Re-exports
pub use config::{
    ResamplingMethod, DEFAULT_SAMPLES, LOWER_PERCENTILE, MEDIAN_PERCENTILE, UPPER_PERCENTILE,
};
pub use resampling::{BootstrapResampler, MonteCarloResampler, Resampler, VarianceEstimator};
pub use types::VarianceEstimate;

use survival_core::{CensorIndicator, Result, Sample};

/// Resample a raw sample and summarize the survival probability at `query`
///
/// `seed` fixes the base seed; `None` draws one from entropy.
///
/// # Errors
/// Fails on invalid samples, unknown configuration or missing uncertainties
/// for Monte Carlo resampling.
pub fn estimate_variance<C: CensorIndicator>(
    query: f64,
    values: &[f64],
    censored: &[C],
    n_samples: usize,
    method: ResamplingMethod,
    uncertainties: Option<&[f64]>,
    seed: Option<u64>,
) -> Result<VarianceEstimate> {
    let sample = Sample::new(values, censored)?;
    let mut estimator = VarianceEstimator::new(method).with_samples(n_samples);
    if let Some(seed) = seed {
        estimator = estimator.with_seed(seed);
    }
    estimator.estimate(query, &sample, uncertainties)
}
