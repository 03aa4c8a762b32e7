//! Censored sample representation
//!
//! A [`Sample`] pairs every value with a left-censoring flag. Censored values
//! are upper bounds (the true value is known only to be `<=` the recorded
//! bound); uncensored values are exact observations ("events").

use crate::{Error, Result};
use num_traits::Zero;
use tracing::debug;

/// Anything that can be read as a left-censoring flag
///
/// Implemented for `bool` and every primitive integer type, where any
/// non-zero integer means "censored".
pub trait CensorIndicator: Copy {
    /// Whether the paired value is a censoring bound
    fn is_censored(self) -> bool;
}

impl CensorIndicator for bool {
    #[inline]
    fn is_censored(self) -> bool {
        self
    }
}

macro_rules! impl_integer_indicator {
    ($($t:ty),* $(,)?) => {
        $(
            impl CensorIndicator for $t {
                #[inline]
                fn is_censored(self) -> bool {
                    !self.is_zero()
                }
            }
        )*
    };
}

impl_integer_indicator!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// A single value with its censoring flag
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// Observed value, or the censoring bound if `censored` is set
    pub value: f64,
    /// `true` if `value` is a left-censoring bound
    pub censored: bool,
}

impl Observation {
    /// An exact (uncensored) observation
    pub fn event(value: f64) -> Self {
        Self {
            value,
            censored: false,
        }
    }

    /// A left-censored observation: the true value is `<= bound`
    pub fn limit(bound: f64) -> Self {
        Self {
            value: bound,
            censored: true,
        }
    }
}

/// A non-empty, ordered collection of censored observations
///
/// Values and flags are stored as parallel vectors so resampling can
/// gather both by index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSample"))]
pub struct Sample {
    values: Vec<f64>,
    censored: Vec<bool>,
}

/// Unvalidated wire form of [`Sample`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSample {
    values: Vec<f64>,
    censored: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSample> for Sample {
    type Error = Error;

    fn try_from(raw: RawSample) -> Result<Self> {
        Sample::new(&raw.values, &raw.censored)
    }
}

impl Sample {
    /// Build a sample from parallel value and flag slices
    ///
    /// # Errors
    /// - [`Error::InsufficientData`] if `values` is empty
    /// - [`Error::InvalidInput`] if the lengths differ or a value is not finite
    pub fn new<C: CensorIndicator>(values: &[f64], censored: &[C]) -> Result<Self> {
        if values.is_empty() {
            debug!("rejected empty sample");
            return Err(Error::empty_input("sample construction"));
        }
        if censored.len() != values.len() {
            debug!(values = values.len(), flags = censored.len(), "rejected sample: length mismatch");
            return Err(Error::size_mismatch(values.len(), censored.len(), "censor flags"));
        }
        if values.iter().any(|v| !v.is_finite()) {
            debug!("rejected sample: non-finite value");
            return Err(Error::non_finite("sample values"));
        }

        Ok(Self {
            values: values.to_vec(),
            censored: censored.iter().map(|c| c.is_censored()).collect(),
        })
    }

    /// Build a sample from observations
    pub fn from_observations<I>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Observation>,
    {
        let (values, censored): (Vec<f64>, Vec<bool>) = observations
            .into_iter()
            .map(|o| (o.value, o.censored))
            .unzip();
        Self::new(&values, &censored)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values, censored or not, in sample order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Censoring flags, in sample order
    pub fn censored_flags(&self) -> &[bool] {
        &self.censored
    }

    /// Iterate over the observations in sample order
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.values
            .iter()
            .zip(&self.censored)
            .map(|(&value, &censored)| Observation { value, censored })
    }

    /// Uncensored values, in sample order
    pub fn events(&self) -> Vec<f64> {
        self.observations()
            .filter(|o| !o.censored)
            .map(|o| o.value)
            .collect()
    }

    /// Censored values (bounds), in sample order
    pub fn limits(&self) -> Vec<f64> {
        self.observations()
            .filter(|o| o.censored)
            .map(|o| o.value)
            .collect()
    }

    /// Number of uncensored observations
    pub fn n_events(&self) -> usize {
        self.censored.iter().filter(|&&c| !c).count()
    }

    /// Number of censored observations
    pub fn n_limits(&self) -> usize {
        self.censored.iter().filter(|&&c| c).count()
    }

    /// Largest value in the sample, censored or not
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Gather a new sample by index; each flag travels with its value
    ///
    /// # Panics
    /// Panics if an index is out of range or `indices` is empty.
    pub fn resample(&self, indices: &[usize]) -> Self {
        assert!(!indices.is_empty(), "resample indices must be non-empty");
        Self {
            values: indices.iter().map(|&i| self.values[i]).collect(),
            censored: indices.iter().map(|&i| self.censored[i]).collect(),
        }
    }

    /// Same censoring flags, new values
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if the length differs or a value is not finite.
    pub fn with_values(&self, values: &[f64]) -> Result<Self> {
        Self::new(values, &self.censored)
    }
}
