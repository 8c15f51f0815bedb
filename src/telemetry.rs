//! Diagnostic logging for the command-line tool.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to binaries. [`init`] installs a compact stderr formatter filtered by the
//! `PULLWIRE_LOG` environment variable.

use tracing_subscriber::EnvFilter;

use crate::github::PullsError;

/// Environment variable holding `tracing` filter directives.
pub const LOG_ENV: &str = "PULLWIRE_LOG";

/// Directive applied when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Builds the event filter from optional directives.
///
/// Blank or unparsable directives fall back to [`DEFAULT_DIRECTIVE`].
#[must_use]
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global stderr subscriber.
///
/// # Errors
///
/// Returns `PullsError::Configuration` when a global subscriber is already
/// installed.
pub fn init() -> Result<(), PullsError> {
    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| PullsError::Configuration {
            message: format!("failed to install log subscriber: {error}"),
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::env_filter;

    #[rstest]
    #[case::unset(None, "warn")]
    #[case::blank(Some("  "), "warn")]
    #[case::valid(Some("pullwire=debug"), "pullwire=debug")]
    #[case::invalid(Some("pullwire=verbose"), "warn")]
    fn filter_falls_back_to_warn(#[case] directives: Option<&str>, #[case] expected: &str) {
        assert_eq!(env_filter(directives).to_string(), expected);
    }
}
