//! Bootstrap and Monte Carlo spread of a survival probability
//!
//! Run with `RUST_LOG=debug` to see the trial logs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use survival_core::Sample;
use survival_variance::{ResamplingMethod, VarianceEstimator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let normal = Normal::new(10.0, 2.0)?;

    // Values below 8 are only known as upper limits
    let values: Vec<f64> = (0..60).map(|_| normal.sample(&mut rng)).collect();
    let censored: Vec<bool> = values.iter().map(|&v| v < 8.0).collect();
    let errors = vec![0.5; values.len()];
    let sample = Sample::new(&values, &censored)?;

    println!("{} observations, {} upper limits", sample.len(), sample.n_limits());

    for method in [ResamplingMethod::Bootstrap, ResamplingMethod::MonteCarlo] {
        let estimator = VarianceEstimator::new(method).with_samples(2000).with_seed(1);
        for query in [8.0, 10.0, 12.0] {
            let estimate = estimator.estimate(query, &sample, Some(&errors))?;
            println!("{method:>12}  S({query:>4.1}) = {estimate}");
        }
    }

    Ok(())
}
