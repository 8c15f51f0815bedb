//! Typed pull request operations over an injected transport.
//!
//! [`PullRequests`] turns each method call into one HTTP request (or a lazy
//! sequence of them) and decodes the response into records. It borrows its
//! transport, so any [`GitHubTransport`] works: Octocrab in production, a
//! mock in tests.

mod params;
mod pull_request_ops;

pub use params::{
    ListPullRequests, MergeOptions, NewPullRequest, NewReviewComment, PullRequestSort,
    PullRequestState, PullRequestUpdate, SortDirection, StateChange,
};

use http::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::error::PullsError;
use super::locator::{PullRequestLocator, RepositoryLocator};
use super::models::{FromWire, PullRequest};
use super::pagination::{ListOptions, Pages};
use super::transport::{ApiRequest, GitHubTransport};

/// Pull request operations bound to a transport.
///
/// # Example
///
/// ```no_run
/// use pullwire::github::client::PullRequests;
/// use pullwire::github::locator::{PersonalAccessToken, PullRequestLocator};
/// use pullwire::github::pagination::ListOptions;
/// use pullwire::github::transport::OctocrabTransport;
///
/// # async fn run() -> Result<(), pullwire::github::PullsError> {
/// let locator = PullRequestLocator::parse("https://github.com/octo/widgets/pull/42")?;
/// let token = PersonalAccessToken::new("ghp_example")?;
/// let transport = OctocrabTransport::for_token(&token, locator.api_base().as_str())?;
/// let pulls = PullRequests::new(&transport);
///
/// let pull = pulls.get(&locator).await?;
/// let files = pulls.files(&pull, ListOptions::all()).collect().await?;
/// # let _ = files;
/// # Ok(())
/// # }
/// ```
pub struct PullRequests<'client, T: ?Sized> {
    transport: &'client T,
}

impl<'client, T> PullRequests<'client, T>
where
    T: GitHubTransport + ?Sized,
{
    /// Binds the operations to a transport.
    #[must_use]
    pub const fn new(transport: &'client T) -> Self {
        Self { transport }
    }

    /// Fetches a single pull request.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::NotFound` for a missing pull request, an
    /// authentication or API error for other failing statuses, and
    /// `PullsError::Decode` when the payload is malformed.
    pub async fn get(&self, locator: &PullRequestLocator) -> Result<PullRequest, PullsError> {
        debug!(
            owner = locator.owner().as_str(),
            repository = locator.repository().as_str(),
            number = locator.number().get(),
            "fetching pull request"
        );
        let response = self
            .transport
            .send(ApiRequest::get(locator.pull_request_path()))
            .await?;
        let operation = "fetch pull request";
        required(response.expect_json(StatusCode::OK, operation)?, operation)
    }

    /// Opens a pull request.
    ///
    /// # Errors
    ///
    /// Returns an API error when GitHub rejects the payload, for example when
    /// the head has no commits ahead of the base.
    pub async fn create(
        &self,
        repository: &RepositoryLocator,
        pull: &NewPullRequest,
    ) -> Result<PullRequest, PullsError> {
        debug!(head = %pull.head, base = %pull.base, "creating pull request");
        let response = self
            .transport
            .send(ApiRequest::post(repository.pulls_path(), pull.to_json()))
            .await?;
        let operation = "create pull request";
        required(response.expect_json(StatusCode::CREATED, operation)?, operation)
    }

    /// Lists a repository's pull requests lazily.
    #[must_use]
    pub fn list(
        &self,
        repository: &RepositoryLocator,
        filters: &ListPullRequests,
        options: ListOptions,
    ) -> Pages<'client, T, PullRequest> {
        let request = filters
            .query_pairs()
            .into_iter()
            .fold(ApiRequest::get(repository.pulls_path()), |pending, (key, value)| {
                pending.with_query(key, value)
            });
        Pages::new(self.transport, request, options, "list pull requests")
    }
}

/// Decodes a record the operation cannot do without.
fn required<R: FromWire>(value: Option<Value>, operation: &str) -> Result<R, PullsError> {
    let Some(payload) = value else {
        return Err(PullsError::UnexpectedResponse {
            operation: operation.to_owned(),
            message: "GitHub returned no record".to_owned(),
        });
    };
    R::from_wire(payload)
}

/// Decodes an optional record.
fn optional<R: FromWire>(value: Option<Value>) -> Result<Option<R>, PullsError> {
    value.map(R::from_wire).transpose()
}
