//! Synthetic population generation.
//!
//! A [`Population`] is the ground-truth dataset every resampling engine
//! draws from. It is generated once per run and only ever borrowed
//! afterwards.

use std::ops::Deref;

use rand::Rng;
use rand_distr::Distribution;

use crate::distributions::Normal;
use crate::error::{ResampleError, Result};
use crate::random::create_rng;
use crate::stats;

/// Immutable, fixed-size sequence of observations.
///
/// Dereferences to `[f64]`, so it can be passed anywhere a slice is
/// expected (`&population`).
#[derive(Debug, Clone, PartialEq)]
pub struct Population(Vec<f64>);

impl Population {
    /// Wraps existing observations.
    ///
    /// # Errors
    /// - [`ResampleError::EmptyInput`] if `values` is empty.
    /// - [`ResampleError::InvalidParameter`] if any value is NaN or ±∞.
    pub fn from_vec(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ResampleError::EmptyInput("Population::from_vec"));
        }
        stats::require_finite(&values, "Population::from_vec")?;
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean of the population.
    pub fn mean(&self) -> Result<f64> {
        stats::mean(&self.0)
    }

    /// Sample standard deviation (n − 1) of the population.
    pub fn std_dev(&self) -> Result<f64> {
        stats::std_dev(&self.0)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for Population {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Population {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Generates `size` independent draws from Normal(`mean`, `stddev`).
///
/// The generator is seeded from `seed` and lives only for this call, so
/// repeated calls with the same arguments return identical populations
/// and nothing else in the process is affected.
///
/// # Errors
/// - [`ResampleError::InvalidParameter`] if `size == 0`, `stddev < 0`, or
///   either distribution parameter is not finite.
///
/// # Examples
/// ```
/// use u_resample::population::generate;
/// let a = generate(100, 100.0, 10.0, 42).unwrap();
/// let b = generate(100, 100.0, 10.0, 42).unwrap();
/// assert_eq!(a.len(), 100);
/// assert_eq!(a, b);
/// ```
pub fn generate(size: usize, mean: f64, stddev: f64, seed: u64) -> Result<Population> {
    let dist = Normal::new(mean, stddev)?;
    let mut rng = create_rng(seed);
    generate_with(size, &dist, &mut rng)
}

/// Generates `size` draws from `dist` using a caller-supplied random source.
///
/// # Errors
/// [`ResampleError::InvalidParameter`] if `size == 0`.
pub fn generate_with<R: Rng>(size: usize, dist: &Normal, rng: &mut R) -> Result<Population> {
    if size == 0 {
        return Err(ResampleError::InvalidParameter(
            "population size must be > 0".into(),
        ));
    }
    let values: Vec<f64> = (0..size).map(|_| dist.sample(rng)).collect();
    tracing::debug!(
        size,
        mean = dist.mean(),
        stddev = dist.std_dev(),
        "generated population"
    );
    Ok(Population(values))
}
