//! Empirical Central Limit Theorem check for the standard error of the mean.
//!
//! The CLT predicts `SE(x̄) = σ / √n` for samples of size `n`.
//! [`empirical_clt`] measures it instead: it draws many independent samples
//! from the population, records each sample mean, and returns the
//! standard error of those means. The analytic value is available
//! separately from [`theoretical_se`] so the two can be compared rather
//! than conflated.

use rand::Rng;

use crate::error::{ResampleError, Result};
use crate::random::{create_rng, map_resamples};
use crate::stats::{mean, require_finite, sample_standard_error};

/// Estimates the standard error of the mean from `num_samples` fresh
/// samples of size `sample_size` drawn with replacement from `population`.
///
/// Seeding follows [`bootstrap`](crate::bootstrap::bootstrap): one base
/// seed from `rng`, one derived stream per iteration.
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `population` is empty.
/// - [`ResampleError::InvalidParameter`] if `population` holds NaN or ±∞,
///   or `sample_size == 0`.
/// - [`ResampleError::InsufficientData`] if `num_samples < 2`.
///
/// # Examples
/// ```
/// use u_resample::clt::{empirical_clt, theoretical_se};
/// use u_resample::population::generate;
/// use u_resample::random::create_rng;
///
/// let pop = generate(10_000, 100.0, 10.0, 42).unwrap();
/// let se = empirical_clt(&pop, 100, 1_000, &mut create_rng(1)).unwrap();
/// let expected = theoretical_se(10.0, 100).unwrap();
/// assert!((se - expected).abs() < 0.15);
/// ```
pub fn empirical_clt<R: Rng>(
    population: &[f64],
    sample_size: usize,
    num_samples: usize,
    rng: &mut R,
) -> Result<f64> {
    if population.is_empty() {
        return Err(ResampleError::EmptyInput("empirical_clt"));
    }
    require_finite(population, "empirical_clt")?;
    if sample_size == 0 {
        return Err(ResampleError::InvalidParameter(
            "empirical_clt: sample_size must be > 0".into(),
        ));
    }
    if num_samples < 2 {
        return Err(ResampleError::InsufficientData {
            needed: 2,
            got: num_samples,
        });
    }

    tracing::debug!(
        population = population.len(),
        sample_size,
        num_samples,
        "empirical CLT"
    );

    let base_seed: u64 = rng.random();
    let means = map_resamples(population, num_samples, sample_size, base_seed, mean)?;
    let se = sample_standard_error(&means)?;
    tracing::trace!(se_mean = se, "empirical CLT done");
    Ok(se)
}

/// [`empirical_clt`] with a generator seeded from `seed`.
pub fn empirical_clt_seeded(
    population: &[f64],
    sample_size: usize,
    num_samples: usize,
    seed: u64,
) -> Result<f64> {
    let mut rng = create_rng(seed);
    empirical_clt(population, sample_size, num_samples, &mut rng)
}

/// Analytic CLT standard error `σ / √n`.
///
/// # Errors
/// - [`ResampleError::InvalidParameter`] if `stddev` is negative or not
///   finite, or `sample_size == 0`.
pub fn theoretical_se(stddev: f64, sample_size: usize) -> Result<f64> {
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(ResampleError::InvalidParameter(format!(
            "theoretical_se: stddev must be finite and >= 0, got {stddev}"
        )));
    }
    if sample_size == 0 {
        return Err(ResampleError::InvalidParameter(
            "theoretical_se: sample_size must be > 0".into(),
        ));
    }
    Ok(stddev / (sample_size as f64).sqrt())
}
