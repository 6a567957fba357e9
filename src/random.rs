//! Seeded random sources and sampling with replacement.
//!
//! Provides seeded RNG construction, counter-based stream seeding for
//! independent iterations, and uniform resampling with replacement.
//!
//! # Reproducibility
//!
//! There is no process-wide generator. Every function takes its random
//! source explicitly, either as `&mut impl Rng` or as a `u64` seed passed
//! to [`create_rng`]. The generator algorithm is pinned, so the same seed
//! yields the same draws on every target, 32- and 64-bit alike.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{ResampleError, Result};

/// Creates a fast, seeded random number generator.
///
/// Always Xoshiro256++ seeded through SplitMix64, independent of target
/// pointer width and of the `rand` release (unlike `rand::rngs::SmallRng`).
///
/// # Examples
/// ```
/// use u_resample::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// Derives the seed of stream `index` from a base seed.
///
/// SplitMix64 finalizer over `base + (index + 1) · γ`. Consecutive indices
/// map to well-separated seeds, so iteration `i` of a resampling loop can
/// build its own generator without touching any shared state, and the
/// result does not depend on the order (or thread) iterations run on.
///
/// Reference: Steele, Lea & Flood (2014), "Fast Splittable Pseudorandom
/// Number Generators", OOPSLA.
///
/// # Examples
/// ```
/// use u_resample::random::stream_seed;
/// assert_eq!(stream_seed(42, 7), stream_seed(42, 7));
/// assert_ne!(stream_seed(42, 7), stream_seed(42, 8));
/// ```
pub fn stream_seed(base: u64, index: u64) -> u64 {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draws `sample_size` values uniformly, independently, with replacement
/// from `source`.
///
/// `source` is only read; it can be resampled any number of times.
///
/// # Complexity
/// Time: O(sample_size), Space: O(sample_size)
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `source` is empty.
/// - [`ResampleError::InvalidParameter`] if `sample_size == 0`.
///
/// # Examples
/// ```
/// use u_resample::random::{create_rng, resample};
/// let data = [1.0, 2.0, 3.0];
/// let mut rng = create_rng(42);
/// let sample = resample(&data, 10, &mut rng).unwrap();
/// assert_eq!(sample.len(), 10);
/// assert!(sample.iter().all(|x| data.contains(x)));
/// ```
pub fn resample<R: Rng>(
    source: &[f64],
    sample_size: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    validate_resample(source, sample_size)?;
    let mut out = vec![0.0; sample_size];
    fill_with_replacement(source, &mut out, rng);
    Ok(out)
}

/// Fills `out` with values drawn with replacement from `source`.
///
/// Same semantics as [`resample`] with `sample_size = out.len()`, but
/// reuses the caller's buffer. Used by the resampling engines to avoid
/// one allocation per iteration.
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `source` is empty.
/// - [`ResampleError::InvalidParameter`] if `out` is empty.
pub fn resample_into<R: Rng>(
    source: &[f64],
    out: &mut [f64],
    rng: &mut R,
) -> Result<()> {
    validate_resample(source, out.len())?;
    fill_with_replacement(source, out, rng);
    Ok(())
}

/// Returns `sample_size` indices drawn uniformly with replacement from
/// `[0, n)`.
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `n == 0`.
/// - [`ResampleError::InvalidParameter`] if `sample_size == 0`.
///
/// # Examples
/// ```
/// use u_resample::random::{create_rng, resample_indices};
/// let mut rng = create_rng(7);
/// let idx = resample_indices(5, 20, &mut rng).unwrap();
/// assert_eq!(idx.len(), 20);
/// assert!(idx.iter().all(|&i| i < 5));
/// ```
pub fn resample_indices<R: Rng>(
    n: usize,
    sample_size: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if n == 0 {
        return Err(ResampleError::EmptyInput("resample_indices"));
    }
    if sample_size == 0 {
        return Err(ResampleError::InvalidParameter(
            "sample_size must be > 0".into(),
        ));
    }
    Ok((0..sample_size).map(|_| rng.random_range(0..n)).collect())
}

fn validate_resample(source: &[f64], sample_size: usize) -> Result<()> {
    if source.is_empty() {
        return Err(ResampleError::EmptyInput("resample"));
    }
    if sample_size == 0 {
        return Err(ResampleError::InvalidParameter(
            "sample_size must be > 0".into(),
        ));
    }
    Ok(())
}

// Caller guarantees `source` is non-empty.
fn fill_with_replacement<R: Rng>(source: &[f64], out: &mut [f64], rng: &mut R) {
    let n = source.len();
    for slot in out.iter_mut() {
        *slot = source[rng.random_range(0..n)];
    }
}

/// Draws `iterations` independent resamples of `sample_size` from `source`
/// and maps each through `statistic`, returning one value per iteration in
/// iteration order.
///
/// Iteration `i` uses its own generator seeded with
/// `stream_seed(base_seed, i)`, so the output is identical whether the
/// loop runs sequentially or on the rayon pool (`parallel` feature).
/// Each worker reuses a single sample buffer.
pub(crate) fn map_resamples<T, F>(
    source: &[f64],
    iterations: usize,
    sample_size: usize,
    base_seed: u64,
    statistic: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&[f64]) -> Result<T> + Sync,
{
    validate_resample(source, sample_size)?;

    #[cfg(feature = "parallel")]
    let values = {
        use rayon::prelude::*;
        (0..iterations)
            .into_par_iter()
            .map_init(
                || vec![0.0; sample_size],
                |buf, i| {
                    let mut rng = create_rng(stream_seed(base_seed, i as u64));
                    fill_with_replacement(source, buf, &mut rng);
                    statistic(buf.as_slice())
                },
            )
            .collect::<Result<Vec<T>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let values = {
        let mut buf = vec![0.0; sample_size];
        let mut values = Vec::with_capacity(iterations);
        for i in 0..iterations {
            let mut rng = create_rng(stream_seed(base_seed, i as u64));
            fill_with_replacement(source, &mut buf, &mut rng);
            values.push(statistic(buf.as_slice())?);
        }
        values
    };

    Ok(values)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| rng1.random()).collect();
        let vals2: Vec<f64> = (0..10).map(|_| rng2.random()).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_create_rng_is_xoshiro256plusplus() {
        // SplitMix64 expands the seed into the four state words; its k-th
        // output is `stream_seed(seed, k)`.
        let seed = 42;
        let mut s: [u64; 4] = std::array::from_fn(|k| stream_seed(seed, k as u64));
        let mut reference = || {
            let out = s[0].wrapping_add(s[3]).rotate_left(23).wrapping_add(s[0]);
            let t = s[1] << 17;
            s[2] ^= s[0];
            s[3] ^= s[1];
            s[1] ^= s[2];
            s[0] ^= s[3];
            s[2] ^= t;
            s[3] = s[3].rotate_left(45);
            out
        };
        let expected: Vec<u64> = (0..8).map(|_| reference()).collect();

        let mut rng = create_rng(seed);
        let got: Vec<u64> = (0..8).map(|_| rng.next_u64()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_stream_seed_distinct() {
        let seeds: Vec<u64> = (0..1000).map(|i| stream_seed(42, i)).collect();
        let mut dedup = seeds.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), seeds.len());
        assert_ne!(stream_seed(1, 0), stream_seed(2, 0));
    }

    #[test]
    fn test_resample_length_and_membership() {
        let data = [10.0, 20.0, 30.0, 40.0];
        let mut rng = create_rng(123);
        let sample = resample(&data, 50, &mut rng).unwrap();
        assert_eq!(sample.len(), 50);
        assert!(sample.iter().all(|x| data.contains(x)));
    }

    #[test]
    fn test_resample_does_not_mutate_source() {
        let data = vec![3.0, 1.0, 2.0];
        let before = data.clone();
        let mut rng = create_rng(0);
        for _ in 0..10 {
            let _ = resample(&data, 5, &mut rng).unwrap();
        }
        assert_eq!(data, before);
    }

    #[test]
    fn test_resample_deterministic() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let a = resample(&data, 30, &mut create_rng(9)).unwrap();
        let b = resample(&data, 30, &mut create_rng(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resample_single_source() {
        let mut rng = create_rng(1);
        let sample = resample(&[5.0], 8, &mut rng).unwrap();
        assert_eq!(sample, vec![5.0; 8]);
    }

    #[test]
    fn test_resample_empty_source() {
        let mut rng = create_rng(1);
        assert_eq!(
            resample(&[], 3, &mut rng),
            Err(ResampleError::EmptyInput("resample"))
        );
    }

    #[test]
    fn test_resample_zero_size() {
        let mut rng = create_rng(1);
        assert!(matches!(
            resample(&[1.0], 0, &mut rng),
            Err(ResampleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_resample_into_matches_resample() {
        let data: Vec<f64> = (0..50).map(f64::from).collect();
        let expected = resample(&data, 12, &mut create_rng(77)).unwrap();
        let mut buf = vec![0.0; 12];
        resample_into(&data, &mut buf, &mut create_rng(77)).unwrap();
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_resample_into_empty_buffer() {
        let mut rng = create_rng(1);
        let mut buf: Vec<f64> = Vec::new();
        assert!(resample_into(&[1.0, 2.0], &mut buf, &mut rng).is_err());
    }

    #[test]
    fn test_resample_indices_errors() {
        let mut rng = create_rng(1);
        assert!(resample_indices(0, 3, &mut rng).is_err());
        assert!(resample_indices(3, 0, &mut rng).is_err());
    }

    #[test]
    fn test_map_resamples_order_and_reproducibility() {
        let data: Vec<f64> = (0..20).map(f64::from).collect();
        let first = |s: &[f64]| Ok(s[0]);
        let a = map_resamples(&data, 50, 3, 11, first).unwrap();
        let b = map_resamples(&data, 50, 3, 11, first).unwrap();
        assert_eq!(a.len(), 50);
        assert_eq!(a, b);

        // Iteration i is exactly the draw of stream i.
        for (i, &v) in a.iter().enumerate() {
            let mut rng = create_rng(stream_seed(11, i as u64));
            let expected = resample(&data, 3, &mut rng).unwrap();
            assert_eq!(v, expected[0]);
        }
    }

    #[test]
    fn test_map_resamples_propagates_statistic_error() {
        let result: Result<Vec<f64>> = map_resamples(&[1.0, 2.0], 4, 2, 0, |_| {
            Err(ResampleError::InvalidParameter("boom".into()))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_map_resamples_validates_inputs() {
        let id = |s: &[f64]| Ok(s.len());
        assert!(map_resamples(&[], 4, 2, 0, id).is_err());
        assert!(map_resamples(&[1.0], 4, 0, 0, id).is_err());
        assert_eq!(map_resamples(&[1.0], 0, 2, 0, id).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_resample_uniform_coverage() {
        // Every index of a small source should be hit with ~equal frequency.
        let mut rng = create_rng(42);
        let idx = resample_indices(4, 40_000, &mut rng).unwrap();
        let mut counts = [0u32; 4];
        for i in idx {
            counts[i] += 1;
        }
        for &c in &counts {
            let frac = c as f64 / 40_000.0;
            assert!((frac - 0.25).abs() < 0.02, "frequency {frac} not ~0.25");
        }
    }
}
