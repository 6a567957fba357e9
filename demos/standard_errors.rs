//! Prints bootstrap and CLT standard errors for the default experiment.
//!
//! ```text
//! RUST_LOG=u_resample=info cargo run --example standard_errors
//! ```

use tracing_subscriber::EnvFilter;
use u_resample::{run, ExperimentConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ExperimentConfig::default();
    let report = run(&config)?;
    print!("{report}");
    Ok(())
}
