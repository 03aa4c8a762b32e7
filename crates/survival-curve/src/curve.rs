//! Kaplan-Meier survival curve for left-censored data
//!
//! The curve is a step function over the sorted uncensored values plus a
//! sentinel breakpoint `floor(max(values)) + 1` (the next float above the
//! maximum where that increment is lost to rounding). At breakpoint `i >= 1` the
//! survival is
//!
//! ```text
//! S[i] = 1 - (#events < bp[i] + #limits < bp[i - 1]) / n
//! ```
//!
//! with `S[0] = 1` and the value at the sentinel forced to 0: censored mass is
//! treated as resolved by the time the sentinel is reached. Tied event times
//! are resolved jointly by the strict comparison rather than through the
//! product-limit update.

use survival_core::{
    math::{count_below, interpolate, next_up, sorted},
    CensorIndicator, Error, Result, Sample,
};
use tracing::{instrument, trace};

/// Trait for estimators that turn a censored sample into a survival curve
///
/// Resampling code is generic over this trait so that every trial rebuilds
/// its curve with the same estimator.
pub trait SurvivalEstimator: Clone + Send + Sync {
    /// Build the survival curve of `sample`
    fn estimate(&self, sample: &Sample) -> SurvivalCurve;

    /// Estimator name for logs and reports
    fn name(&self) -> &'static str;
}

/// Kaplan-Meier estimator with left censoring and joint tie resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct KaplanMeier;

impl SurvivalEstimator for KaplanMeier {
    #[instrument(level = "trace", skip(self, sample), fields(n = sample.len()))]
    fn estimate(&self, sample: &Sample) -> SurvivalCurve {
        let n = sample.len() as f64;
        let events = sorted(&sample.events());
        let limits = sorted(&sample.limits());
        let sentinel = sentinel_above(sample.max_value());

        if events.is_empty() {
            trace!(sentinel, "no uncensored values, survival drops at the sentinel");
            return SurvivalCurve {
                breakpoints: vec![sentinel, sentinel],
                survival: vec![1.0, 0.0],
            };
        }

        let mut breakpoints = events.clone();
        breakpoints.push(sentinel);

        let mut survival = Vec::with_capacity(breakpoints.len());
        survival.push(1.0);
        survival.extend(breakpoints.windows(2).map(|w| {
            let lost = count_below(&events, w[1]) + count_below(&limits, w[0]);
            1.0 - lost as f64 / n
        }));

        // Everything still surviving at the sentinel is censored mass
        if let Some(last) = survival.last_mut() {
            *last = 0.0;
        }

        trace!(
            n_events = events.len(),
            n_limits = limits.len(),
            sentinel,
            "built survival curve"
        );

        SurvivalCurve {
            breakpoints,
            survival,
        }
    }

    fn name(&self) -> &'static str {
        "Kaplan-Meier"
    }
}

/// `floor(max) + 1`, or the next float above `max` when `+ 1` is absorbed
fn sentinel_above(max: f64) -> f64 {
    let sentinel = max.floor() + 1.0;
    if sentinel > max {
        sentinel
    } else {
        next_up(max)
    }
}

/// A right-continuous survival step function
///
/// `breakpoints` is sorted ascending and ends with a sentinel strictly greater
/// than every observed value; `survival` holds one non-increasing probability
/// per breakpoint, starting at 1 and ending at 0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCurve"))]
pub struct SurvivalCurve {
    breakpoints: Vec<f64>,
    survival: Vec<f64>,
}

/// Unvalidated wire form of [`SurvivalCurve`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCurve {
    breakpoints: Vec<f64>,
    survival: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCurve> for SurvivalCurve {
    type Error = Error;

    fn try_from(raw: RawCurve) -> Result<Self> {
        SurvivalCurve::from_parts(raw.breakpoints, raw.survival)
    }
}

impl SurvivalCurve {
    /// Assemble a curve from precomputed breakpoints and survival values
    ///
    /// # Errors
    /// [`Error::InvalidInput`] unless there are at least two breakpoints,
    /// one survival value per breakpoint, breakpoints are non-decreasing and
    /// free of NaN, and survival values lie in `[0, 1]` without increasing.
    pub fn from_parts(breakpoints: Vec<f64>, survival: Vec<f64>) -> Result<Self> {
        if breakpoints.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "survival curve needs at least 2 breakpoints, got {}",
                breakpoints.len()
            )));
        }
        if survival.len() != breakpoints.len() {
            return Err(Error::size_mismatch(
                breakpoints.len(),
                survival.len(),
                "survival values",
            ));
        }
        if breakpoints.iter().any(|b| b.is_nan()) {
            return Err(Error::non_finite("breakpoints"));
        }
        if breakpoints.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidInput("breakpoints must be non-decreasing".to_string()));
        }
        if survival.iter().any(|s| !(0.0..=1.0).contains(s)) {
            return Err(Error::InvalidInput(
                "survival values must lie in [0, 1]".to_string(),
            ));
        }
        if survival.windows(2).any(|w| w[0] < w[1]) {
            return Err(Error::InvalidInput("survival values must not increase".to_string()));
        }

        Ok(Self {
            breakpoints,
            survival,
        })
    }

    /// Kaplan-Meier curve of `sample`
    pub fn kaplan_meier(sample: &Sample) -> Self {
        KaplanMeier.estimate(sample)
    }

    /// Breakpoints: sorted event values followed by the sentinel
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Survival probability at each breakpoint
    pub fn survival(&self) -> &[f64] {
        &self.survival
    }

    /// Number of breakpoints
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Always `false`: a curve has at least the sentinel
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// The terminal breakpoint, strictly above every observed value
    pub fn sentinel(&self) -> f64 {
        self.breakpoints[self.breakpoints.len() - 1]
    }

    /// Iterate over `(breakpoint, survival)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.breakpoints
            .iter()
            .copied()
            .zip(self.survival.iter().copied())
    }

    /// Linearly interpolated survival probability at `x`
    ///
    /// Below the first breakpoint this is 1; at or beyond the sentinel it is 0.
    pub fn interpolate(&self, x: f64) -> f64 {
        interpolate(x, &self.breakpoints, &self.survival)
    }

    /// [`interpolate`](Self::interpolate) over several query points
    pub fn interpolate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.interpolate(x)).collect()
    }
}

/// Build the Kaplan-Meier curve from parallel value and flag slices
///
/// # Example
///
/// ```rust
/// use survival_curve::estimate_curve;
///
/// let curve = estimate_curve(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0, 0, 0, 0, 1]).unwrap();
/// assert_eq!(curve.breakpoints(), &[1.0, 2.0, 3.0, 4.0, 6.0]);
/// ```
pub fn estimate_curve<C: CensorIndicator>(values: &[f64], censored: &[C]) -> Result<SurvivalCurve> {
    let sample = Sample::new(values, censored)?;
    Ok(SurvivalCurve::kaplan_meier(&sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_curve_eq(curve: &SurvivalCurve, breakpoints: &[f64], survival: &[f64]) {
        assert_eq!(curve.breakpoints(), breakpoints);
        assert_eq!(curve.survival().len(), survival.len());
        for (&got, &want) in curve.survival().iter().zip(survival) {
            assert_abs_diff_eq!(got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_censored_upper_value() {
        let curve = estimate_curve(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[false, false, false, false, true],
        )
        .unwrap();

        // Pre-forcing value at the sentinel would be 0.2
        assert_curve_eq(
            &curve,
            &[1.0, 2.0, 3.0, 4.0, 6.0],
            &[1.0, 0.8, 0.6, 0.4, 0.0],
        );
        assert_eq!(curve.sentinel(), 6.0);
    }

    #[test]
    fn test_uncensored_reduces_to_empirical_survival() {
        let values = [0.5, 2.25, 1.75, 3.0];
        let curve = estimate_curve(&values, &[false; 4]).unwrap();

        assert_eq!(curve.breakpoints(), &[0.5, 1.75, 2.25, 3.0, 4.0]);
        for (bp, s) in curve.iter() {
            let below = values.iter().filter(|&&v| v < bp).count() as f64;
            assert_abs_diff_eq!(s, 1.0 - below / values.len() as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_limits_counted_at_previous_breakpoint() {
        // Limit at 1.5 is lost once the previous breakpoint passes it
        let curve = estimate_curve(&[1.0, 1.5, 2.0, 3.0], &[0, 1, 0, 0]).unwrap();

        // bp = [1, 2, 3, 4]
        // i=1: events<2 = 1, limits<1 = 0 -> 0.75
        // i=2: events<3 = 2, limits<2 = 1 -> 0.25
        // i=3: forced 0
        assert_curve_eq(&curve, &[1.0, 2.0, 3.0, 4.0], &[1.0, 0.75, 0.25, 0.0]);
    }

    #[test]
    fn test_tied_events_resolved_jointly() {
        let curve = estimate_curve(&[2.0, 2.0, 3.0, 5.0], &[false; 4]).unwrap();

        // Both ties at 2 drop together when the breakpoint passes 2
        assert_curve_eq(
            &curve,
            &[2.0, 2.0, 3.0, 5.0, 6.0],
            &[1.0, 1.0, 0.5, 0.25, 0.0],
        );
        assert_eq!(curve.len(), 5);
    }

    #[test]
    fn test_all_censored() {
        let curve = estimate_curve(&[1.0, 2.5, 3.2], &[true, true, true]).unwrap();

        assert_curve_eq(&curve, &[4.0, 4.0], &[1.0, 0.0]);
        assert_eq!(curve.interpolate(3.9), 1.0);
        assert_eq!(curve.interpolate(4.0), 0.0);
    }

    #[test]
    fn test_single_observation() {
        let curve = estimate_curve(&[2.5], &[false]).unwrap();
        assert_curve_eq(&curve, &[2.5, 3.0], &[1.0, 0.0]);
    }

    #[test]
    fn test_negative_values_sentinel() {
        let curve = estimate_curve(&[-3.5, -2.2], &[false, false]).unwrap();
        // floor(-2.2) + 1 = -2
        assert_eq!(curve.sentinel(), -2.0);
        assert!(curve.breakpoints().iter().all(|&b| b <= curve.sentinel()));
    }

    #[test]
    fn test_interpolation_boundaries() {
        let curve = estimate_curve(&[1.0, 2.0, 3.0], &[false; 3]).unwrap();

        assert_eq!(curve.interpolate(-10.0), 1.0);
        assert_eq!(curve.interpolate(1.0), 1.0);
        assert_abs_diff_eq!(curve.interpolate(1.5), (1.0 + 2.0 / 3.0) / 2.0, epsilon = 1e-12);
        assert_eq!(curve.interpolate(4.0), 0.0);
        assert_eq!(curve.interpolate(100.0), 0.0);
        assert_eq!(curve.interpolate_many(&[-1.0, 100.0]), vec![1.0, 0.0]);
    }

    #[test]
    fn test_invalid_input() {
        assert!(estimate_curve(&[1.0, 2.0], &[false]).is_err());
        let empty: [bool; 0] = [];
        assert!(estimate_curve(&[], &empty).is_err());
    }

    #[test]
    fn test_estimator_name() {
        assert_eq!(KaplanMeier.name(), "Kaplan-Meier");
    }

    #[test]
    fn test_sentinel_above_huge_values() {
        // floor(x) + 1 == x beyond 2^53
        let big = 2f64.powi(60);
        let curve = estimate_curve(&[1.0, big], &[false, false]).unwrap();
        assert!(curve.sentinel() > big);
        assert_eq!(curve.interpolate(big), 0.5);

        let curve = estimate_curve(&[-big, -2.0 * big], &[false, true]).unwrap();
        assert!(curve.sentinel() > -big);

        let censored = estimate_curve(&[big], &[true]).unwrap();
        assert!(censored.sentinel() > big);
        assert_eq!(censored.interpolate(big), 1.0);
    }

    #[test]
    fn test_from_parts() {
        let built = estimate_curve(&[1.0, 2.0, 3.0], &[false; 3]).unwrap();
        let rebuilt = SurvivalCurve::from_parts(
            built.breakpoints().to_vec(),
            built.survival().to_vec(),
        )
        .unwrap();
        assert_eq!(rebuilt, built);

        assert!(SurvivalCurve::from_parts(vec![], vec![]).is_err());
        assert!(SurvivalCurve::from_parts(vec![1.0], vec![1.0]).is_err());
        assert!(SurvivalCurve::from_parts(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(SurvivalCurve::from_parts(vec![2.0, 1.0], vec![1.0, 0.0]).is_err());
        assert!(SurvivalCurve::from_parts(vec![1.0, f64::NAN], vec![1.0, 0.0]).is_err());
        assert!(SurvivalCurve::from_parts(vec![1.0, 2.0], vec![0.5, 0.8]).is_err());
        assert!(SurvivalCurve::from_parts(vec![1.0, 2.0], vec![1.5, 0.0]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_curve_deserialization_is_validated() {
        let curve = estimate_curve(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0, 0, 0, 0, 1]).unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        assert_eq!(serde_json::from_str::<SurvivalCurve>(&json).unwrap(), curve);

        // Mismatched or empty parts would panic in interpolate / sentinel
        let mismatched = r#"{"breakpoints":[1.0,2.0,3.0],"survival":[1.0,0.0]}"#;
        assert!(serde_json::from_str::<SurvivalCurve>(mismatched).is_err());
        let empty = r#"{"breakpoints":[],"survival":[]}"#;
        assert!(serde_json::from_str::<SurvivalCurve>(empty).is_err());
    }
}
