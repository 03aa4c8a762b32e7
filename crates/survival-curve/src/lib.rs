//! Kaplan-Meier survival curves for left-censored samples
//!
//! This crate builds survival curves from censored samples and evaluates them
//! at arbitrary query points.
//!
//! # Overview
//!
//! Left-censored observations are upper bounds: the true value is only known
//! to be at or below the recorded value. The [`KaplanMeier`] estimator counts
//! such bounds as lost one breakpoint later than exact observations and drops
//! the curve to zero at a sentinel above the largest value.
//!
//! Evaluation interpolates linearly between breakpoints. A query point can
//! carry a symmetric or asymmetric uncertainty ([`QueryError`]); the curve is
//! then also evaluated at the shifted points and the induced spread of the
//! probability is reported.
//!
//! # Examples
//!
//! ```rust
//! use survival_curve::{estimate_curve, evaluate_at, QueryError};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let censored = [false, false, false, false, true];
//!
//! let curve = estimate_curve(&x, &censored).unwrap();
//! assert_eq!(curve.survival(), &[1.0, 0.8, 0.6, 0.4, 0.0]);
//!
//! let e = evaluate_at(2.5, &x, &censored, &QueryError::symmetric(vec![0.5])).unwrap();
//! println!("S(2.5) = {:.2} (-{:.2} / +{:.2})",
//!     e.probability,
//!     e.uncertainty.unwrap().lower,
//!     e.uncertainty.unwrap().upper);
//! ```

mod curve;
mod evaluate;

// Re-exports
pub use curve::{estimate_curve, KaplanMeier, SurvivalCurve, SurvivalEstimator};
pub use evaluate::{evaluate, evaluate_at, evaluate_sample, Evaluation, QueryError, Uncertainty};
