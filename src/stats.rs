//! Statistic estimators used by the resampling engines.
//!
//! Every function here is a pure function of its input slice: nothing is
//! sorted or modified in place, so the same population or sample can be
//! passed to any number of estimators in any order.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation for O(ε) error independent of n.
//! - **Variance**: Welford's online algorithm with Bessel's correction.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Standard error**: `sqrt(s² / n)` where `s²` is the sample variance.

use crate::error::{ResampleError, Result};

/// Computes the arithmetic mean using compensated summation.
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `data` is empty.
/// - [`ResampleError::InvalidParameter`] if `data` contains NaN or ±∞.
///
/// # Examples
/// ```
/// use u_resample::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(mean(&v).unwrap(), 3.0);
/// ```
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(ResampleError::EmptyInput("mean"));
    }
    require_finite(data, "mean")?;
    Ok(kahan_sum(data) / data.len() as f64)
}

/// Computes the median of `data` without mutating the input.
///
/// Sorts a private copy, then returns the middle element (odd length) or
/// the average of the two middle elements (even length).
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `data` is empty.
/// - [`ResampleError::InvalidParameter`] if `data` contains NaN or ±∞.
///
/// # Examples
/// ```
/// use u_resample::stats::median;
/// let v = vec![3.0, 1.0, 2.0];
/// assert_eq!(median(&v).unwrap(), 2.0);
/// assert_eq!(v, vec![3.0, 1.0, 2.0]); // input untouched
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
/// ```
pub fn median(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(ResampleError::EmptyInput("median"));
    }
    require_finite(data, "median")?;
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Computes the sample variance (denominator `n − 1`).
///
/// # Errors
/// - [`ResampleError::InsufficientData`] if `data.len() < 2`.
/// - [`ResampleError::InvalidParameter`] if `data` contains NaN or ±∞.
///
/// # Examples
/// ```
/// use u_resample::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Result<f64> {
    require_len(data, 2)?;
    require_finite(data, "variance")?;
    let mut acc = WelfordAccumulator::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Errors
/// Same as [`variance`].
pub fn std_dev(data: &[f64]) -> Result<f64> {
    variance(data).map(f64::sqrt)
}

/// Computes the standard error of the mean of `data`.
///
/// ```text
/// SE = sqrt(s² / n),   s² = Σ(xᵢ − x̄)² / (n − 1)
/// ```
///
/// Applied to a distribution of bootstrap statistics this yields the
/// standard error of that statistic.
///
/// # Errors
/// - [`ResampleError::InsufficientData`] if `data.len() < 2`. A single
///   value has no spread to estimate, so no NaN is ever returned.
/// - [`ResampleError::InvalidParameter`] if `data` contains NaN or ±∞.
///
/// # Examples
/// ```
/// use u_resample::stats::sample_standard_error;
/// let se = sample_standard_error(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert!((se - 0.70710678119).abs() < 1e-6);
/// assert!(sample_standard_error(&[1.0]).is_err());
/// ```
pub fn sample_standard_error(data: &[f64]) -> Result<f64> {
    let var = variance(data)?;
    Ok((var / data.len() as f64).sqrt())
}

/// Returns the minimum value in the slice.
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `data` is empty.
/// - [`ResampleError::InvalidParameter`] if `data` contains NaN.
pub fn min(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(ResampleError::EmptyInput("min"));
    }
    data.iter().copied().try_fold(f64::INFINITY, |acc, x| {
        if x.is_nan() {
            Err(ResampleError::InvalidParameter(
                "min: data must not contain NaN".into(),
            ))
        } else {
            Ok(acc.min(x))
        }
    })
}

/// Returns the maximum value in the slice.
///
/// # Errors
/// - [`ResampleError::EmptyInput`] if `data` is empty.
/// - [`ResampleError::InvalidParameter`] if `data` contains NaN.
pub fn max(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(ResampleError::EmptyInput("max"));
    }
    data.iter().copied().try_fold(f64::NEG_INFINITY, |acc, x| {
        if x.is_nan() {
            Err(ResampleError::InvalidParameter(
                "max: data must not contain NaN".into(),
            ))
        } else {
            Ok(acc.max(x))
        }
    })
}

fn require_len(data: &[f64], needed: usize) -> Result<()> {
    if data.len() < needed {
        return Err(ResampleError::InsufficientData {
            needed,
            got: data.len(),
        });
    }
    Ok(())
}

/// Rejects NaN and ±∞, naming the calling operation in the message.
pub(crate) fn require_finite(data: &[f64], op: &str) -> Result<()> {
    if !data.iter().all(|x| x.is_finite()) {
        return Err(ResampleError::InvalidParameter(format!(
            "{op}: data must be finite"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation.
///
/// Improved Kahan summation that also handles an addend larger in
/// magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik
/// und Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Welford accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for mean and sample variance.
///
/// Single pass, O(1) memory. Two accumulators built over disjoint chunks
/// can be combined with [`merge`](Self::merge).
///
/// # Examples
/// ```
/// use u_resample::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one observation into the accumulator.
    ///
    /// The first observation becomes the mean as-is; the delta update
    /// starts from the second.
    pub fn update(&mut self, value: f64) {
        let n1 = self.count;
        self.count += 1;
        if n1 == 0 {
            self.mean_acc = value;
            return;
        }
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Number of observations seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean.
    ///
    /// # Errors
    /// [`ResampleError::EmptyInput`] before the first update.
    pub fn mean(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(ResampleError::EmptyInput("WelfordAccumulator::mean"));
        }
        Ok(self.mean_acc)
    }

    /// Sample variance (n − 1 denominator).
    ///
    /// # Errors
    /// [`ResampleError::InsufficientData`] with fewer than 2 observations.
    pub fn sample_variance(&self) -> Result<f64> {
        if self.count < 2 {
            return Err(ResampleError::InsufficientData {
                needed: 2,
                got: self.count as usize,
            });
        }
        Ok(self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation.
    pub fn sample_std_dev(&self) -> Result<f64> {
        self.sample_variance().map(f64::sqrt)
    }

    /// Standard error of the running mean, `sqrt(s² / n)`.
    pub fn standard_error(&self) -> Result<f64> {
        let var = self.sample_variance()?;
        Ok((var / self.count as f64).sqrt())
    }

    /// Merges another accumulator into this one.
    ///
    /// Reference: Chan, Golub & LeVeque (1979), "Updating Formulae and a
    /// Pairwise Algorithm for Computing Sample Variances".
    pub fn merge(&mut self, other: &WelfordAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let na = self.count as f64;
        let nb = other.count as f64;
        let total = self.count + other.count;
        let n = total as f64;
        let delta = other.mean_acc - self.mean_acc;

        self.mean_acc += delta * (nb / n);
        self.m2 += other.m2 + delta * delta * na * nb / n;
        self.count = total;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
