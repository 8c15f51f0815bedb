//! Pullwire command-line entrypoint.
//!
//! Loads layered configuration, then runs one action against the configured
//! pull request and prints the result.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pullwire::{PullsError, PullwireConfig, telemetry};
use tracing::debug;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = telemetry::init() {
        // Logging is optional; keep going without it.
        if writeln!(io::stderr().lock(), "warning: {error}").is_err() {
            return ExitCode::FAILURE;
        }
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(?error, "action failed");
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), PullsError> {
    let config = load_config()?;
    cli::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`PullsError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PullwireConfig, PullsError> {
    PullwireConfig::load().map_err(|error| PullsError::Configuration {
        message: error.to_string(),
    })
}
