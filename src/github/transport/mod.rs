//! The HTTP seam between the pull request bindings and GitHub.
//!
//! Every operation in this crate is one request through a [`GitHubTransport`]
//! followed by decoding of the response. The trait keeps authentication and
//! connection handling outside the bindings, lets tests substitute a mock, and
//! leaves [`OctocrabTransport`] to perform real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod octocrab_transport;
mod request;
mod response;

pub use octocrab_transport::OctocrabTransport;
pub use request::{ApiRequest, MediaType};
pub use response::ApiResponse;


use async_trait::async_trait;

use crate::github::error::PullsError;

/// Client able to perform a single GitHub API request.
///
/// Implementations must not interpret non-success status codes: the response
/// is handed back as-is so callers can apply per-operation status rules (for
/// example a `404` meaning "not merged" rather than an error).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubTransport: Send + Sync {
    /// Sends the request and returns the raw response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PullsError>;
}
