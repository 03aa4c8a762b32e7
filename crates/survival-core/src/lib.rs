//! Core types for censored survival analysis
//!
//! This crate provides the pieces shared by the survival-stats crates:
//!
//! - [`Sample`] / [`Observation`]: values paired with left-censoring flags
//! - [`Error`] / [`Result`]: the unified error type
//! - [`execution`]: sequential and (feature `parallel`) rayon engines for
//!   independent resampling trials
//! - [`math`]: sorted-rank counting, NaN-aware reductions, interpolation,
//!   percentiles and chi-squared tail probabilities
//!
//! # Example
//!
//! ```rust
//! use survival_core::Sample;
//!
//! // Integer flags are accepted: non-zero means censored
//! let sample = Sample::new(&[1.0, 2.0, 3.0, 4.0], &[0, 0, 1, 0]).unwrap();
//! assert_eq!(sample.events(), vec![1.0, 2.0, 4.0]);
//! assert_eq!(sample.limits(), vec![3.0]);
//! ```

pub mod error;
pub mod execution;
pub mod math;
pub mod sample;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

pub use sample::{CensorIndicator, Observation, Sample};
