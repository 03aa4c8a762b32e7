//! Kaplan-Meier survival analysis for left-censored samples
//!
//! This crate re-exports the survival-stats workspace:
//!
//! - [`core`]: samples, errors, execution engines and numeric helpers
//! - [`curve`]: Kaplan-Meier curves and their evaluation at query points
//! - [`variance`]: bootstrap and Monte Carlo spread of curve values
//! - [`logrank`]: two-sample log-rank test (Mantel / Pike)
//!
//! The most common entry points are available at the crate root and take raw
//! value and flag slices. Flags may be `bool` or any primitive integer, where
//! non-zero marks an upper limit.
//!
//! # Examples
//!
//! ```rust
//! use survival_stats::{estimate_curve, evaluate_at, log_rank_test, QueryError, LogRankEstimator};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let c = [0, 0, 0, 0, 1];
//!
//! let curve = estimate_curve(&x, &c).unwrap();
//! assert_eq!(curve.breakpoints(), &[1.0, 2.0, 3.0, 4.0, 6.0]);
//!
//! let e = evaluate_at(2.5, &x, &c, &QueryError::None).unwrap();
//! assert!((e.probability - 0.7).abs() < 1e-12);
//!
//! let result = log_rank_test(&x, &c, &[3.0, 4.0, 6.0, 7.0], &[0, 1, 0, 1], LogRankEstimator::Pike)
//!     .unwrap();
//! println!("{result}");
//! ```

pub use survival_core as core;
pub use survival_curve as curve;
pub use survival_logrank as logrank;
pub use survival_variance as variance;

pub use survival_core::{CensorIndicator, Error, Observation, Result, Sample};
pub use survival_curve::{
    estimate_curve, evaluate, evaluate_at, Evaluation, KaplanMeier, QueryError, SurvivalCurve,
    SurvivalEstimator, Uncertainty,
};
pub use survival_logrank::{log_rank_test, LogRankEstimator, LogRankResult, LogRankTest};
pub use survival_variance::{
    estimate_variance, ResamplingMethod, VarianceEstimate, VarianceEstimator,
};

/// Commonly used types
pub mod prelude {
    pub use survival_core::{ExecutionEngine, Sample, SequentialEngine};
    #[cfg(feature = "parallel")]
    pub use survival_core::ParallelEngine;
    pub use survival_curve::{QueryError, SurvivalCurve, SurvivalEstimator};
    pub use survival_logrank::{LogRankEstimator, LogRankTest};
    pub use survival_variance::{ResamplingMethod, VarianceEstimator};
}
