//! Run-level driver: one population, one row of standard errors per
//! sample size.
//!
//! [`run`] generates the population described by an [`ExperimentConfig`],
//! then for every requested sample size computes the empirical CLT
//! standard error of the mean alongside the bootstrap standard errors of
//! the mean and median. The resulting [`ExperimentReport`] renders as the
//! plain-text report through [`std::fmt::Display`].

use std::fmt;

use crate::bootstrap::bootstrap;
use crate::clt::empirical_clt;
use crate::error::{ResampleError, Result};
use crate::population::generate;
use crate::random::{create_rng, stream_seed};

/// Parameters of a standard-error experiment.
///
/// # Examples
/// ```
/// use u_resample::experiment::ExperimentConfig;
/// let cfg = ExperimentConfig::default()
///     .with_population_size(1_000)
///     .with_sample_sizes(vec![10, 40]);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperimentConfig {
    /// Number of observations in the synthetic population.
    pub population_size: usize,
    /// Mean of the generating normal distribution.
    pub mean: f64,
    /// Standard deviation of the generating normal distribution.
    pub stddev: f64,
    /// Bootstrap iterations per sample size.
    pub bootstrap_samples: usize,
    /// Sample sizes to evaluate, in report order.
    pub sample_sizes: Vec<usize>,
    /// Fresh samples per sample size for the empirical CLT estimate.
    pub clt_samples: usize,
    /// Seed for population generation and all resampling.
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            mean: 100.0,
            stddev: 10.0,
            bootstrap_samples: 100,
            sample_sizes: vec![25, 100, 225, 400],
            clt_samples: 1_000,
            seed: 42,
        }
    }
}

impl ExperimentConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_distribution(mut self, mean: f64, stddev: f64) -> Self {
        self.mean = mean;
        self.stddev = stddev;
        self
    }

    pub fn with_bootstrap_samples(mut self, bootstrap_samples: usize) -> Self {
        self.bootstrap_samples = bootstrap_samples;
        self
    }

    pub fn with_sample_sizes(mut self, sample_sizes: Vec<usize>) -> Self {
        self.sample_sizes = sample_sizes;
        self
    }

    pub fn with_clt_samples(mut self, clt_samples: usize) -> Self {
        self.clt_samples = clt_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every parameter before any work is done.
    ///
    /// # Errors
    /// - [`ResampleError::InvalidParameter`] for a zero population size, a
    ///   negative or non-finite `stddev`, a non-finite `mean`, an empty
    ///   `sample_sizes` list, or a zero entry in it.
    /// - [`ResampleError::InsufficientData`] if `bootstrap_samples` or
    ///   `clt_samples` is below 2.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(ResampleError::InvalidParameter(
                "population_size must be > 0".into(),
            ));
        }
        if !self.mean.is_finite() || !self.stddev.is_finite() || self.stddev < 0.0 {
            return Err(ResampleError::InvalidParameter(format!(
                "distribution requires finite mean and stddev >= 0, got mean={}, stddev={}",
                self.mean, self.stddev
            )));
        }
        if self.sample_sizes.is_empty() {
            return Err(ResampleError::InvalidParameter(
                "sample_sizes must not be empty".into(),
            ));
        }
        if self.sample_sizes.contains(&0) {
            return Err(ResampleError::InvalidParameter(
                "sample_sizes entries must be > 0".into(),
            ));
        }
        for got in [self.bootstrap_samples, self.clt_samples] {
            if got < 2 {
                return Err(ResampleError::InsufficientData { needed: 2, got });
            }
        }
        Ok(())
    }
}

/// Standard errors measured for one sample size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSizeReport {
    pub sample_size: usize,
    /// Empirical CLT standard error of the mean.
    pub clt_se_mean: f64,
    /// Bootstrap standard error of the mean.
    pub se_mean: f64,
    /// Bootstrap standard error of the median.
    pub se_median: f64,
}

impl fmt::Display for SampleSizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.sample_size;
        writeln!(f, "Samples of size n = {n}")?;
        writeln!(
            f,
            "  SE Mean from Central Limit Theorem for n = {n}: {:.2}",
            self.clt_se_mean
        )?;
        writeln!(f, "  SE Mean from Bootstrap Samples: {:.2}", self.se_mean)?;
        writeln!(f, "  SE Median from Bootstrap Samples: {:.2}", self.se_median)
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentReport {
    pub population_size: usize,
    /// Observed mean of the generated population.
    pub population_mean: f64,
    /// Observed sample standard deviation of the generated population.
    pub population_std_dev: f64,
    /// One row per configured sample size, in configuration order.
    pub rows: Vec<SampleSizeReport>,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Runs the experiment described by `config`.
///
/// The population uses `config.seed` directly. Resampling draws from a
/// separate stream (`stream_seed(seed, 1)`), so changing the sample sizes
/// never changes the population.
///
/// # Errors
/// Any error from [`ExperimentConfig::validate`]; engine errors are
/// propagated unchanged.
///
/// # Examples
/// ```
/// use u_resample::experiment::{run, ExperimentConfig};
/// let cfg = ExperimentConfig::default()
///     .with_population_size(500)
///     .with_sample_sizes(vec![10])
///     .with_clt_samples(50)
///     .with_bootstrap_samples(20);
/// let report = run(&cfg).unwrap();
/// assert_eq!(report.rows.len(), 1);
/// assert!(report.to_string().starts_with("Samples of size n = 10"));
/// ```
pub fn run(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;

    let population = generate(
        config.population_size,
        config.mean,
        config.stddev,
        config.seed,
    )?;
    let population_mean = population.mean()?;
    let population_std_dev = if population.len() > 1 {
        population.std_dev()?
    } else {
        0.0
    };
    tracing::info!(
        size = population.len(),
        mean = population_mean,
        std_dev = population_std_dev,
        "generated population"
    );

    let mut rng = create_rng(stream_seed(config.seed, 1));
    let mut rows = Vec::with_capacity(config.sample_sizes.len());
    for &sample_size in &config.sample_sizes {
        let clt_se_mean = empirical_clt(&population, sample_size, config.clt_samples, &mut rng)?;
        let se = bootstrap(&population, config.bootstrap_samples, sample_size, &mut rng)?;
        let row = SampleSizeReport {
            sample_size,
            clt_se_mean,
            se_mean: se.mean,
            se_median: se.median,
        };
        tracing::info!(
            sample_size,
            clt_se_mean = row.clt_se_mean,
            se_mean = row.se_mean,
            se_median = row.se_median,
            "sample size done"
        );
        rows.push(row);
    }

    Ok(ExperimentReport {
        population_size: population.len(),
        population_mean,
        population_std_dev,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clt::theoretical_se;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig::default()
            .with_population_size(2_000)
            .with_bootstrap_samples(1_000)
            .with_clt_samples(1_000)
    }

    #[test]
    fn test_default_config() {
        let cfg = ExperimentConfig::default();
        assert_eq!(cfg.population_size, 10_000);
        assert_eq!(cfg.mean, 100.0);
        assert_eq!(cfg.stddev, 10.0);
        assert_eq!(cfg.bootstrap_samples, 100);
        assert_eq!(cfg.sample_sizes, vec![25, 100, 225, 400]);
        assert_eq!(cfg.clt_samples, 1_000);
        assert_eq!(cfg.seed, 42);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let cfg = ExperimentConfig::default()
            .with_distribution(5.0, 1.5)
            .with_seed(9);
        assert_eq!(cfg.mean, 5.0);
        assert_eq!(cfg.stddev, 1.5);
        assert_eq!(cfg.seed, 9);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let base = ExperimentConfig::default();
        assert!(base.clone().with_population_size(0).validate().is_err());
        assert!(base.clone().with_distribution(0.0, -1.0).validate().is_err());
        assert!(base.clone().with_distribution(f64::NAN, 1.0).validate().is_err());
        assert!(base.clone().with_sample_sizes(vec![]).validate().is_err());
        assert!(base.clone().with_sample_sizes(vec![10, 0]).validate().is_err());
        assert_eq!(
            base.clone().with_bootstrap_samples(1).validate(),
            Err(ResampleError::InsufficientData { needed: 2, got: 1 })
        );
        assert_eq!(
            base.with_clt_samples(0).validate(),
            Err(ResampleError::InsufficientData { needed: 2, got: 0 })
        );
    }

    #[test]
    fn test_run_rows_follow_sample_sizes() {
        let report = run(&small_config()).unwrap();
        let sizes: Vec<usize> = report.rows.iter().map(|r| r.sample_size).collect();
        assert_eq!(sizes, vec![25, 100, 225, 400]);
        assert_eq!(report.population_size, 2_000);
        assert!((report.population_mean - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_run_deterministic() {
        let a = run(&small_config()).unwrap();
        let b = run(&small_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_standard_errors_decrease_with_sample_size() {
        let report = run(&small_config()).unwrap();
        for pair in report.rows.windows(2) {
            assert!(pair[1].clt_se_mean < pair[0].clt_se_mean);
            assert!(pair[1].se_mean < pair[0].se_mean);
            assert!(pair[1].se_median < pair[0].se_median);
        }
    }

    #[test]
    fn test_run_matches_clt_prediction() {
        let report = run(&small_config()).unwrap();
        for row in &report.rows {
            let expected = theoretical_se(report.population_std_dev, row.sample_size).unwrap();
            assert!(
                (row.clt_se_mean - expected).abs() / expected < 0.15,
                "n={}: CLT {} vs {}",
                row.sample_size,
                row.clt_se_mean,
                expected
            );
            assert!(
                (row.se_mean - expected).abs() / expected < 0.2,
                "n={}: bootstrap {} vs {}",
                row.sample_size,
                row.se_mean,
                expected
            );
        }
    }

    #[test]
    fn test_run_single_element_population() {
        let cfg = small_config()
            .with_population_size(1)
            .with_sample_sizes(vec![5]);
        let report = run(&cfg).unwrap();
        assert_eq!(report.population_std_dev, 0.0);
        assert_eq!(report.rows[0].se_mean, 0.0);
        assert_eq!(report.rows[0].se_median, 0.0);
    }

    #[test]
    fn test_report_display() {
        let row = SampleSizeReport {
            sample_size: 25,
            clt_se_mean: 2.004,
            se_mean: 1.987,
            se_median: 2.456,
        };
        let expected = "Samples of size n = 25\n\
                        \x20 SE Mean from Central Limit Theorem for n = 25: 2.00\n\
                        \x20 SE Mean from Bootstrap Samples: 1.99\n\
                        \x20 SE Median from Bootstrap Samples: 2.46\n";
        assert_eq!(row.to_string(), expected);

        let report = ExperimentReport {
            population_size: 1,
            population_mean: 0.0,
            population_std_dev: 0.0,
            rows: vec![row, row],
        };
        assert_eq!(report.to_string(), format!("{expected}{expected}"));
    }
}
