//! # u-resample
//!
//! Bootstrap and Central Limit Theorem estimates of the standard error of
//! the mean and the median.
//!
//! The crate generates a synthetic normal population, resamples it with
//! replacement, and reports how much the sample mean and median vary from
//! sample to sample. The empirical CLT estimate is computed alongside so
//! the bootstrap figure can be checked against `σ/√n`.
//!
//! ## Modules
//!
//! - [`population`]: seeded synthetic population generation
//! - [`stats`]: mean, median, variance, standard error
//! - [`random`]: seeded RNGs and resampling with replacement
//! - [`bootstrap`]: bootstrap standard errors of the mean and median
//! - [`clt`]: empirical and analytic CLT standard error of the mean
//! - [`experiment`]: run-level driver producing one report row per sample size
//! - [`distributions`]: the normal distribution behind population generation
//! - [`error`]: the crate error type
//!
//! ## Design Philosophy
//!
//! - **Explicit randomness**: every random operation takes its generator or
//!   seed as an argument; nothing reads global RNG state.
//! - **Non-destructive estimators**: no estimator reorders its input.
//! - **Errors over NaN**: too little data is a [`ResampleError`], never a
//!   silent `NaN`.
//! - **Property-based testing**: invariants verified via proptest.
//!
//! ## Features
//!
//! - `parallel`: run resampling iterations on the rayon thread pool.
//!   Results are identical to the sequential path.
//! - `serde`: `Serialize`/`Deserialize` for configs and reports.
//!
//! ## Example
//!
//! ```
//! use u_resample::{bootstrap, empirical_clt, generate, create_rng};
//!
//! let population = generate(10_000, 100.0, 10.0, 42).unwrap();
//! let mut rng = create_rng(1);
//! let clt = empirical_clt(&population, 100, 1_000, &mut rng).unwrap();
//! let se = bootstrap(&population, 100, 100, &mut rng).unwrap();
//! assert!((clt - 1.0).abs() < 0.2);
//! assert!((se.mean - 1.0).abs() < 0.3);
//! ```

pub mod bootstrap;
pub mod clt;
pub mod distributions;
pub mod error;
pub mod experiment;
pub mod population;
pub mod random;
pub mod stats;

pub use bootstrap::{bootstrap, bootstrap_seeded, StandardErrors};
pub use clt::{empirical_clt, empirical_clt_seeded, theoretical_se};
pub use error::{ResampleError, Result};
pub use experiment::{run, ExperimentConfig, ExperimentReport, SampleSizeReport};
pub use population::{generate, Population};
pub use random::{create_rng, resample};
pub use stats::{mean, median, sample_standard_error};
