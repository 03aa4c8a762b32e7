//! Configuration types for resampling

use std::fmt;
use std::str::FromStr;
use survival_core::Error;

/// Default number of resampling trials
pub const DEFAULT_SAMPLES: usize = 1000;

/// Lower percentile reported as the -1 sigma point
pub const LOWER_PERCENTILE: f64 = 0.1587;

/// Central percentile
pub const MEDIAN_PERCENTILE: f64 = 0.5;

/// Upper percentile reported as the +1 sigma point
pub const UPPER_PERCENTILE: f64 = 0.8413;

const METHOD_OPTIONS: &[&str] = &["boot", "bootstrap", "mc", "monte", "monte carlo"];

/// Resampling strategy for curve-value uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResamplingMethod {
    /// Resample observations with replacement; captures sampling variability
    #[default]
    Bootstrap,
    /// Perturb every value by its Gaussian measurement error
    MonteCarlo,
}

impl ResamplingMethod {
    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::MonteCarlo => "monte carlo",
        }
    }

    /// Whether the method needs per-observation uncertainties
    pub fn requires_uncertainties(&self) -> bool {
        matches!(self, Self::MonteCarlo)
    }
}

impl FromStr for ResamplingMethod {
    type Err = Error;

    /// Case-insensitive exact match against the accepted spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boot" | "bootstrap" => Ok(Self::Bootstrap),
            "mc" | "monte" | "monte carlo" | "monte_carlo" | "montecarlo" => Ok(Self::MonteCarlo),
            _ => Err(Error::unknown_option("Method", s, METHOD_OPTIONS)),
        }
    }
}

impl fmt::Display for ResamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
