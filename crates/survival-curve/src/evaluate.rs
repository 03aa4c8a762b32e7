//! Curve evaluation with optional query-point uncertainty
//!
//! A query point `q` with uncertainty `(e_low, e_high)` is evaluated at
//! `q - e_low`, `q` and `q + e_high`. Because survival is non-increasing, the
//! probability moves down by `S(q) - S(q + e_high)` and up by
//! `S(q - e_low) - S(q)`; these become the lower and upper uncertainty of the
//! returned probability.

use crate::curve::SurvivalCurve;
use survival_core::{CensorIndicator, Error, Result, Sample};
use tracing::{debug, instrument};

/// Uncertainty attached to query points
///
/// Each vector holds one entry per query point, or a single entry that is
/// broadcast over all query points.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryError {
    /// No uncertainty; only probabilities are returned
    #[default]
    None,
    /// Same uncertainty below and above each query point
    Symmetric(Vec<f64>),
    /// Separate lower and upper uncertainties
    Asymmetric { lower: Vec<f64>, upper: Vec<f64> },
}

impl QueryError {
    /// Symmetric uncertainty
    pub fn symmetric(err: impl Into<Vec<f64>>) -> Self {
        Self::Symmetric(err.into())
    }

    /// Asymmetric uncertainty: `lower` below and `upper` above each query point
    pub fn asymmetric(lower: impl Into<Vec<f64>>, upper: impl Into<Vec<f64>>) -> Self {
        Self::Asymmetric {
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Whether any uncertainty is attached
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn validate(&self, n_queries: usize) -> Result<()> {
        let check = |err: &[f64], context: &str| -> Result<()> {
            if err.len() != 1 && err.len() != n_queries {
                return Err(Error::size_mismatch(n_queries, err.len(), context));
            }
            if err.iter().any(|e| !e.is_finite()) {
                return Err(Error::non_finite(context));
            }
            if err.iter().any(|&e| e < 0.0) {
                return Err(Error::InvalidInput(format!(
                    "{context} must be non-negative"
                )));
            }
            Ok(())
        };

        match self {
            Self::None => Ok(()),
            Self::Symmetric(err) => check(err, "query uncertainty"),
            Self::Asymmetric { lower, upper } => {
                check(lower, "lower query uncertainty")?;
                check(upper, "upper query uncertainty")
            }
        }
    }

    /// `(below, above)` offsets for query `index`; call after `validate`
    fn offsets(&self, index: usize) -> Option<(f64, f64)> {
        let pick = |err: &[f64]| if err.len() == 1 { err[0] } else { err[index] };
        match self {
            Self::None => None,
            Self::Symmetric(err) => {
                let e = pick(err);
                Some((e, e))
            }
            Self::Asymmetric { lower, upper } => Some((pick(lower), pick(upper))),
        }
    }
}

/// Spread of a survival probability induced by query uncertainty
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uncertainty {
    /// How far the probability falls when the query moves up
    pub lower: f64,
    /// How far the probability rises when the query moves down
    pub upper: f64,
}

/// Survival probability at a query point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Interpolated survival probability
    pub probability: f64,
    /// Present only when query uncertainty was supplied
    pub uncertainty: Option<Uncertainty>,
}

impl Evaluation {
    /// `(probability - lower, probability + upper)`, or the point itself
    pub fn interval(&self) -> (f64, f64) {
        match self.uncertainty {
            Some(u) => (self.probability - u.lower, self.probability + u.upper),
            None => (self.probability, self.probability),
        }
    }
}

impl SurvivalCurve {
    /// Evaluate the curve at `query`, propagating `query_err`
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if an uncertainty vector has neither one entry
    /// nor one per query point, or holds negative or non-finite values.
    pub fn evaluate(&self, query: &[f64], query_err: &QueryError) -> Result<Vec<Evaluation>> {
        query_err.validate(query.len())?;

        Ok(query
            .iter()
            .enumerate()
            .map(|(i, &q)| {
                let probability = self.interpolate(q);
                let uncertainty = query_err.offsets(i).map(|(below, above)| {
                    let low_side = self.interpolate(q - below);
                    let high_side = self.interpolate(q + above);
                    Uncertainty {
                        lower: probability - high_side,
                        upper: low_side - probability,
                    }
                });
                Evaluation {
                    probability,
                    uncertainty,
                }
            })
            .collect())
    }
}

/// Build the Kaplan-Meier curve of `sample` and evaluate it at `query`
#[instrument(level = "debug", skip_all, fields(n = sample.len(), n_queries = query.len()))]
pub fn evaluate_sample(
    query: &[f64],
    sample: &Sample,
    query_err: &QueryError,
) -> Result<Vec<Evaluation>> {
    let curve = SurvivalCurve::kaplan_meier(sample);
    debug!(
        breakpoints = curve.len(),
        with_uncertainty = !query_err.is_none(),
        "evaluating survival curve"
    );
    curve.evaluate(query, query_err)
}

/// Evaluate the Kaplan-Meier curve of `(values, censored)` at several query points
///
/// # Example
///
/// ```rust
/// use survival_curve::{evaluate, QueryError};
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let c = [false, false, false, false, true];
/// let out = evaluate(&[1.5, 10.0], &x, &c, &QueryError::None).unwrap();
/// assert!((out[0].probability - 0.9).abs() < 1e-12);
/// assert_eq!(out[1].probability, 0.0);
/// ```
pub fn evaluate<C: CensorIndicator>(
    query: &[f64],
    values: &[f64],
    censored: &[C],
    query_err: &QueryError,
) -> Result<Vec<Evaluation>> {
    let sample = Sample::new(values, censored)?;
    evaluate_sample(query, &sample, query_err)
}

/// Evaluate the Kaplan-Meier curve of `(values, censored)` at one query point
pub fn evaluate_at<C: CensorIndicator>(
    query: f64,
    values: &[f64],
    censored: &[C],
    query_err: &QueryError,
) -> Result<Evaluation> {
    let mut out = evaluate(&[query], values, censored, query_err)?;
    out.pop()
        .ok_or_else(|| Error::Computation("evaluation produced no result".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const X: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const C: [bool; 5] = [false, false, false, false, true];

    #[test]
    fn test_evaluate_without_uncertainty() {
        let out = evaluate(&[0.0, 2.5, 5.0, 7.0], &X, &C, &QueryError::None).unwrap();
        let probs: Vec<f64> = out.iter().map(|e| e.probability).collect();

        assert_eq!(probs[0], 1.0);
        assert_abs_diff_eq!(probs[1], 0.7, epsilon = 1e-12);
        // Between 4 (0.4) and the sentinel 6 (0.0)
        assert_abs_diff_eq!(probs[2], 0.2, epsilon = 1e-12);
        assert_eq!(probs[3], 0.0);
        assert!(out.iter().all(|e| e.uncertainty.is_none()));
    }

    #[test]
    fn test_zero_symmetric_uncertainty() {
        let e = evaluate_at(2.5, &X, &C, &QueryError::symmetric(vec![0.0])).unwrap();
        let u = e.uncertainty.unwrap();
        assert_eq!(u.lower, 0.0);
        assert_eq!(u.upper, 0.0);
        assert_eq!(e.interval(), (e.probability, e.probability));
    }

    #[test]
    fn test_symmetric_uncertainty() {
        let e = evaluate_at(2.5, &X, &C, &QueryError::symmetric(vec![0.5])).unwrap();
        let u = e.uncertainty.unwrap();

        // S(2) = 0.8, S(2.5) = 0.7, S(3) = 0.6
        assert_abs_diff_eq!(e.probability, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(u.lower, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(u.upper, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_asymmetric_uncertainty() {
        let err = QueryError::asymmetric(vec![1.5], vec![0.5]);
        let e = evaluate_at(3.0, &X, &C, &err).unwrap();
        let u = e.uncertainty.unwrap();

        // S(1.5) = 0.9, S(3) = 0.6, S(3.5) = 0.5
        assert_abs_diff_eq!(e.probability, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(u.lower, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(u.upper, 0.3, epsilon = 1e-12);
        let (lo, hi) = e.interval();
        assert_abs_diff_eq!(lo, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hi, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_per_query_uncertainty() {
        let err = QueryError::symmetric(vec![0.0, 1.0]);
        let out = evaluate(&[2.0, 3.0], &X, &C, &err).unwrap();

        assert_eq!(out[0].uncertainty, Some(Uncertainty { lower: 0.0, upper: 0.0 }));
        let u = out[1].uncertainty.unwrap();
        assert_abs_diff_eq!(u.lower, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(u.upper, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_uncertainty_clamped_at_curve_ends() {
        // Far beyond the sentinel every shifted point evaluates to 0
        let e = evaluate_at(50.0, &X, &C, &QueryError::symmetric(vec![1.0])).unwrap();
        assert_eq!(e.probability, 0.0);
        assert_eq!(e.uncertainty, Some(Uncertainty { lower: 0.0, upper: 0.0 }));
    }

    #[test]
    fn test_invalid_uncertainty() {
        let bad_len = QueryError::symmetric(vec![0.1, 0.2, 0.3]);
        assert!(evaluate(&[1.0, 2.0], &X, &C, &bad_len).is_err());

        let negative = QueryError::asymmetric(vec![0.1], vec![-0.1]);
        assert!(evaluate_at(1.0, &X, &C, &negative).is_err());

        let nan = QueryError::symmetric(vec![f64::NAN]);
        assert!(evaluate_at(1.0, &X, &C, &nan).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_evaluate_rejects_bad_sample() {
        assert!(evaluate_at(1.0, &X, &[false, true], &QueryError::None).is_err());
    }
}
