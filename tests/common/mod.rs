//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use survival_stats::Sample;

pub const EPSILON: f64 = 1e-12;

/// Five observations with the largest one an upper limit
pub fn reference_data() -> (Vec<f64>, Vec<bool>) {
    (
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
        vec![false, false, false, false, true],
    )
}

/// Normal draws; values below `detection_limit` are recorded as limits
pub fn censored_normal(n: usize, mean: f64, sd: f64, detection_limit: f64, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(mean, sd).unwrap();
    let mut values = Vec::with_capacity(n);
    let mut flags = Vec::with_capacity(n);
    for _ in 0..n {
        let v: f64 = normal.sample(&mut rng);
        if v < detection_limit {
            values.push(detection_limit);
            flags.push(true);
        } else {
            values.push(v);
            flags.push(false);
        }
    }
    Sample::new(&values, &flags).unwrap()
}

/// Initialize tracing once for tests that want to see logs with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
