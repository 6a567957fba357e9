//! Bootstrap standard errors of the mean and median.
//!
//! # Algorithm
//!
//! For each of `B` iterations, draw a sample of size `n` with replacement
//! from the population and record its mean and median. The standard error
//! of each statistic is the [`sample_standard_error`] of its `B` recorded
//! values.
//!
//! Reference: Efron & Tibshirani (1993), *An Introduction to the
//! Bootstrap*, Chapman & Hall, Ch. 6.
//!
//! Larger `B` reduces Monte Carlo noise in the estimate at linear cost.

use rand::Rng;

use crate::error::{ResampleError, Result};
use crate::random::{create_rng, map_resamples};
use crate::stats::{mean, median, require_finite, sample_standard_error};

/// Bootstrap standard errors of the sample mean and sample median.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardErrors {
    /// Standard error of the mean.
    pub mean: f64,
    /// Standard error of the median.
    pub median: f64,
}

/// Estimates the standard errors of the mean and median by bootstrap.
///
/// One base seed is drawn from `rng`. Iteration `i` then resamples with
/// its own stream derived from that seed, which makes the result
/// independent of execution order and identical with the `parallel`
/// feature enabled.
///
/// # Complexity
/// Time: O(B · n log n), Space: O(B + n)
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `population` is empty.
/// - [`ResampleError::InvalidParameter`] if `population` holds NaN or ±∞,
///   or `sample_size == 0`.
/// - [`ResampleError::InsufficientData`] if `bootstrap_samples < 2`.
///
/// # Examples
/// ```
/// use u_resample::bootstrap::bootstrap;
/// use u_resample::population::generate;
/// use u_resample::random::create_rng;
///
/// let pop = generate(100, 100.0, 10.0, 42).unwrap();
/// let mut rng = create_rng(7);
/// let se = bootstrap(&pop, 10, 10, &mut rng).unwrap();
/// assert!(se.mean > 0.0 && se.median > 0.0);
/// ```
pub fn bootstrap<R: Rng>(
    population: &[f64],
    bootstrap_samples: usize,
    sample_size: usize,
    rng: &mut R,
) -> Result<StandardErrors> {
    if population.is_empty() {
        return Err(ResampleError::EmptyInput("bootstrap"));
    }
    require_finite(population, "bootstrap")?;
    if sample_size == 0 {
        return Err(ResampleError::InvalidParameter(
            "bootstrap: sample_size must be > 0".into(),
        ));
    }
    if bootstrap_samples < 2 {
        return Err(ResampleError::InsufficientData {
            needed: 2,
            got: bootstrap_samples,
        });
    }

    tracing::debug!(
        population = population.len(),
        bootstrap_samples,
        sample_size,
        "bootstrap"
    );

    let base_seed: u64 = rng.random();
    let stats = map_resamples(
        population,
        bootstrap_samples,
        sample_size,
        base_seed,
        |sample| Ok((mean(sample)?, median(sample)?)),
    )?;
    let (means, medians): (Vec<f64>, Vec<f64>) = stats.into_iter().unzip();

    let se = StandardErrors {
        mean: sample_standard_error(&means)?,
        median: sample_standard_error(&medians)?,
    };
    tracing::trace!(se_mean = se.mean, se_median = se.median, "bootstrap done");
    Ok(se)
}

/// [`bootstrap`] with a generator seeded from `seed`.
pub fn bootstrap_seeded(
    population: &[f64],
    bootstrap_samples: usize,
    sample_size: usize,
    seed: u64,
) -> Result<StandardErrors> {
    let mut rng = create_rng(seed);
    bootstrap(population, bootstrap_samples, sample_size, &mut rng)
}
