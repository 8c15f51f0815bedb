//! Octocrab client setup for one API base.
//!
//! Each transport owns a client pinned to a single API base. The same base
//! is kept as a [`Url`] so absolute URLs found in wire records can be
//! rewritten into paths Octocrab resolves against it.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::PullsError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// An authenticated client and the API base it sends to.
pub(super) struct BaseClient {
    pub(super) client: Octocrab,
    pub(super) api_base: Url,
}

/// Builds a token-authenticated client pinned to `api_base`.
///
/// # Errors
///
/// Returns `PullsError::InvalidUrl` when `api_base` is not an absolute URL,
/// or `PullsError::Api` when Octocrab rejects the configuration.
pub(super) fn connect(token: &PersonalAccessToken, api_base: &str) -> Result<BaseClient, PullsError> {
    let parsed = Url::parse(api_base).map_err(|error| PullsError::InvalidUrl(error.to_string()))?;
    let base_uri = parsed
        .as_str()
        .parse::<Uri>()
        .map_err(|error| PullsError::InvalidUrl(format!("{api_base}: {error}")))?;

    let client = Octocrab::builder()
        .personal_token(token.value())
        .base_uri(base_uri)
        .map_err(|error| PullsError::Api {
            message: format!("configure client for {api_base} failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))?;

    Ok(BaseClient {
        client,
        api_base: parsed,
    })
}
