//! Parametric distributions used to synthesize populations.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`Normal`] | μ, σ ≥ 0 | μ | σ² |
//!
//! Sampling goes through [`rand_distr::Distribution`], so any `Rng` can
//! drive it and the draws are reproducible for a seeded generator.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{ResampleError, Result};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// `σ = 0` is accepted and degenerates to a point mass at `μ`, which is
/// useful for constant populations in tests.
///
/// # Examples
/// ```
/// use u_resample::distributions::Normal;
/// use u_resample::random::create_rng;
/// use rand_distr::Distribution;
///
/// let n = Normal::new(100.0, 10.0).unwrap();
/// let mut rng = create_rng(42);
/// let x = n.sample(&mut rng);
/// assert!(x.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Creates a new normal distribution N(μ, σ).
    ///
    /// # Errors
    /// Returns [`ResampleError::InvalidParameter`] if `sigma < 0` or either
    /// parameter is not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(ResampleError::InvalidParameter(format!(
                "Normal requires finite μ and σ >= 0, got μ={mu}, σ={sigma}"
            )));
        }
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn mean(&self) -> f64 {
        self.mu
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    pub fn std_dev(&self) -> f64 {
        self.sigma
    }
}

impl Distribution<f64> for Normal {
    /// μ + σ·Z with Z ~ N(0, 1) (ziggurat, via `rand_distr`).
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.sigma == 0.0 {
            return self.mu;
        }
        let z: f64 = StandardNormal.sample(rng);
        self.mu + self.sigma * z
    }
}

// ============================================================================
// Tests
// ============================================================================
