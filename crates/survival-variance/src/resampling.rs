//! Resampling engine for survival-curve uncertainty
//!
//! Every trial draws a perturbed sample, rebuilds the curve with the configured
//! [`SurvivalEstimator`] and interpolates it at the query point. Trials are
//! scheduled through an [`ExecutionEngine`]; trial `i` draws from stream `i`
//! of a ChaCha generator keyed by the base seed, so results do not depend on
//! the engine or on thread scheduling, and nearby base seeds share no trials.

use crate::config::{ResamplingMethod, DEFAULT_SAMPLES};
use crate::types::VarianceEstimate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use survival_core::{Error, ExecutionEngine, Result, Sample, SequentialEngine};
use survival_curve::{KaplanMeier, SurvivalEstimator};
use tracing::{debug, instrument};

/// Generator for trial `trial` of a run keyed by `base_seed`
fn trial_rng(base_seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
    rng.set_stream(trial as u64);
    rng
}

/// Strategy for drawing one perturbed sample per trial
pub trait Resampler: Send + Sync {
    /// Draw one resampled copy of `sample`
    fn resample<R: Rng + ?Sized>(&self, sample: &Sample, rng: &mut R) -> Result<Sample>;

    /// Resampler name for logs
    fn name(&self) -> &'static str;
}

/// Draw `n` observations with replacement; censoring flags travel with values
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapResampler;

impl Resampler for BootstrapResampler {
    fn resample<R: Rng + ?Sized>(&self, sample: &Sample, rng: &mut R) -> Result<Sample> {
        let n = sample.len();
        if n == 0 {
            return Err(Error::empty_input("bootstrap resampling"));
        }
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        Ok(sample.resample(&indices))
    }

    fn name(&self) -> &'static str {
        "bootstrap"
    }
}

/// Replace every value with a Gaussian draw centred on it
#[derive(Debug, Clone)]
pub struct MonteCarloResampler {
    distributions: Vec<Normal<f64>>,
}

impl MonteCarloResampler {
    /// Build one normal distribution per observation
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if the lengths differ or an uncertainty is
    /// negative or not finite.
    pub fn new(sample: &Sample, uncertainties: &[f64]) -> Result<Self> {
        if uncertainties.len() != sample.len() {
            return Err(Error::size_mismatch(
                sample.len(),
                uncertainties.len(),
                "measurement uncertainties",
            ));
        }
        if uncertainties.iter().any(|e| !e.is_finite()) {
            return Err(Error::non_finite("measurement uncertainties"));
        }
        if let Some(e) = uncertainties.iter().find(|&&e| e < 0.0) {
            return Err(Error::InvalidInput(format!(
                "measurement uncertainties must be non-negative, got {e}"
            )));
        }

        let distributions = sample
            .values()
            .iter()
            .zip(uncertainties)
            .map(|(&x, &sd)| {
                Normal::new(x, sd).map_err(|e| Error::Computation(format!("normal({x}, {sd}): {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { distributions })
    }
}

impl Resampler for MonteCarloResampler {
    fn resample<R: Rng + ?Sized>(&self, sample: &Sample, rng: &mut R) -> Result<Sample> {
        let values: Vec<f64> = self.distributions.iter().map(|d| d.sample(rng)).collect();
        sample.with_values(&values)
    }

    fn name(&self) -> &'static str {
        "monte carlo"
    }
}

/// Estimates the spread of a survival probability by resampling
///
/// # Example
/// ```rust
/// use survival_core::Sample;
/// use survival_variance::{ResamplingMethod, VarianceEstimator};
///
/// let sample = Sample::new(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0, 0, 0, 0, 1]).unwrap();
/// let estimate = VarianceEstimator::new(ResamplingMethod::Bootstrap)
///     .with_samples(200)
///     .with_seed(7)
///     .estimate(2.5, &sample, None)
///     .unwrap();
///
/// assert!(estimate.err_low >= 0.0 && estimate.err_high >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct VarianceEstimator<E: ExecutionEngine = SequentialEngine, K: SurvivalEstimator = KaplanMeier> {
    method: ResamplingMethod,
    n_samples: usize,
    seed: Option<u64>,
    engine: E,
    estimator: K,
}

impl VarianceEstimator {
    /// Sequential Kaplan-Meier resampling with [`DEFAULT_SAMPLES`] trials
    pub fn new(method: ResamplingMethod) -> Self {
        Self {
            method,
            n_samples: DEFAULT_SAMPLES,
            seed: None,
            engine: SequentialEngine,
            estimator: KaplanMeier,
        }
    }
}

impl Default for VarianceEstimator {
    fn default() -> Self {
        Self::new(ResamplingMethod::default())
    }
}

impl<E: ExecutionEngine, K: SurvivalEstimator> VarianceEstimator<E, K> {
    /// Set the number of trials
    pub fn with_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Fix the base seed for reproducible results
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Schedule trials on a different engine
    pub fn with_engine<E2: ExecutionEngine>(self, engine: E2) -> VarianceEstimator<E2, K> {
        VarianceEstimator {
            method: self.method,
            n_samples: self.n_samples,
            seed: self.seed,
            engine,
            estimator: self.estimator,
        }
    }

    /// Rebuild each trial's curve with a different estimator
    pub fn with_estimator<K2: SurvivalEstimator>(self, estimator: K2) -> VarianceEstimator<E, K2> {
        VarianceEstimator {
            method: self.method,
            n_samples: self.n_samples,
            seed: self.seed,
            engine: self.engine,
            estimator,
        }
    }

    /// Get the resampling method
    pub fn method(&self) -> ResamplingMethod {
        self.method
    }

    /// Get the number of trials
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Get the execution engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Resample and summarize the survival probability at `query`
    ///
    /// Uses the configured seed, or fresh entropy when none is set.
    /// `uncertainties` is required for [`ResamplingMethod::MonteCarlo`] and
    /// ignored for bootstrap.
    ///
    /// # Errors
    /// - [`Error::InvalidParameter`] if the trial count is zero
    /// - [`Error::InvalidInput`] for a non-finite query or bad uncertainties
    /// - [`Error::MissingInput`] for Monte Carlo without uncertainties
    pub fn estimate(
        &self,
        query: f64,
        sample: &Sample,
        uncertainties: Option<&[f64]>,
    ) -> Result<VarianceEstimate> {
        let base_seed = match self.seed {
            Some(seed) => seed,
            None => StdRng::from_entropy().gen(),
        };
        self.estimate_seeded(query, sample, uncertainties, base_seed)
    }

    /// Like [`estimate`](Self::estimate) but draws the base seed from `rng`
    pub fn estimate_with_rng<R: Rng + ?Sized>(
        &self,
        query: f64,
        sample: &Sample,
        uncertainties: Option<&[f64]>,
        rng: &mut R,
    ) -> Result<VarianceEstimate> {
        let base_seed = rng.gen();
        self.estimate_seeded(query, sample, uncertainties, base_seed)
    }

    #[instrument(
        skip(self, sample, uncertainties),
        fields(n = sample.len(), method = %self.method, n_samples = self.n_samples)
    )]
    fn estimate_seeded(
        &self,
        query: f64,
        sample: &Sample,
        uncertainties: Option<&[f64]>,
        base_seed: u64,
    ) -> Result<VarianceEstimate> {
        if self.n_samples == 0 {
            return Err(Error::InvalidParameter(
                "Number of resampling trials must be positive".to_string(),
            ));
        }
        if !query.is_finite() {
            return Err(Error::non_finite("query point"));
        }

        let estimate = match self.method {
            ResamplingMethod::Bootstrap => {
                if uncertainties.is_some() {
                    debug!("bootstrap ignores measurement uncertainties");
                }
                self.run_trials(&BootstrapResampler, query, sample, base_seed)?
            }
            ResamplingMethod::MonteCarlo => {
                let errors = uncertainties.ok_or_else(|| {
                    Error::missing_input("measurement uncertainties", "monte carlo resampling")
                })?;
                let resampler = MonteCarloResampler::new(sample, errors)?;
                self.run_trials(&resampler, query, sample, base_seed)?
            }
        };

        debug!(
            median = estimate.median,
            err_low = estimate.err_low,
            err_high = estimate.err_high,
            "resampling complete"
        );
        Ok(estimate)
    }

    fn run_trials<S: Resampler>(
        &self,
        resampler: &S,
        query: f64,
        sample: &Sample,
        base_seed: u64,
    ) -> Result<VarianceEstimate> {
        debug!(
            base_seed,
            resampler = resampler.name(),
            estimator = self.estimator.name(),
            threads = self.engine.num_threads(),
            "starting trials"
        );

        let trials = self
            .engine
            .execute_batch(self.n_samples, |i| {
                let mut rng = trial_rng(base_seed, i);
                let resampled = resampler.resample(sample, &mut rng)?;
                Ok(self.estimator.estimate(&resampled).interpolate(query))
            })
            .into_iter()
            .collect::<Result<Vec<f64>>>()?;

        VarianceEstimate::from_trials(&trials)
    }
}
