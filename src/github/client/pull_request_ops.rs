//! Operations on an already fetched pull request and its sub-records.

use http::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::params::{MergeOptions, NewReviewComment, PullRequestUpdate, StateChange};
use super::{PullRequests, optional};
use crate::github::error::PullsError;
use crate::github::models::{
    Contents, FromWire, Issue, IssueComment, PullFile, PullRequest, PullReview, RepoCommit,
    ReviewComment,
};
use crate::github::pagination::{ListOptions, Pages};
use crate::github::transport::{ApiRequest, GitHubTransport, MediaType};

impl<'client, T> PullRequests<'client, T>
where
    T: GitHubTransport + ?Sized,
{
    /// Edits the title, body, or state of a pull request.
    ///
    /// On success `pull` is replaced with GitHub's updated copy and `true` is
    /// returned. An update that changes nothing returns `false` without
    /// contacting GitHub.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or GitHub rejects the edit.
    pub async fn update(
        &self,
        pull: &mut PullRequest,
        changes: &PullRequestUpdate,
    ) -> Result<bool, PullsError> {
        if changes.is_empty() {
            return Ok(false);
        }
        debug!(number = pull.number, "updating pull request");
        let response = self
            .transport
            .send(ApiRequest::patch(pull.url.as_str(), changes.to_json()))
            .await?;
        let Some(value) = response.expect_json(StatusCode::OK, "update pull request")? else {
            return Ok(false);
        };
        *pull = PullRequest::from_wire(value)?;
        Ok(true)
    }

    /// Closes a pull request without merging it.
    ///
    /// # Errors
    ///
    /// See [`PullRequests::update`].
    pub async fn close(&self, pull: &mut PullRequest) -> Result<bool, PullsError> {
        let changes = state_change(pull, StateChange::Closed);
        self.update(pull, &changes).await
    }

    /// Reopens a closed pull request.
    ///
    /// # Errors
    ///
    /// See [`PullRequests::update`].
    pub async fn reopen(&self, pull: &mut PullRequest) -> Result<bool, PullsError> {
        let changes = state_change(pull, StateChange::Open);
        self.update(pull, &changes).await
    }

    /// Adds a discussion comment to the pull request's issue thread.
    ///
    /// An empty body returns `Ok(None)` without contacting GitHub.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or GitHub rejects the comment.
    pub async fn create_comment(
        &self,
        pull: &PullRequest,
        body: &str,
    ) -> Result<Option<IssueComment>, PullsError> {
        if body.is_empty() {
            return Ok(None);
        }
        let url = pull
            .comments_url
            .clone()
            .unwrap_or_else(|| issue_comments_fallback(&pull.url));
        let response = self
            .transport
            .send(ApiRequest::post(url, json!({ "body": body })))
            .await?;
        optional(response.expect_json(StatusCode::CREATED, "create issue comment")?)
    }

    /// Adds a review comment at a position in the diff.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or GitHub rejects the comment,
    /// for example when the position is outside the diff.
    pub async fn create_review_comment(
        &self,
        pull: &PullRequest,
        comment: &NewReviewComment,
    ) -> Result<Option<ReviewComment>, PullsError> {
        let response = self
            .transport
            .send(ApiRequest::post(
                format!("{}/comments", pull.url),
                comment.to_json(),
            ))
            .await?;
        optional(response.expect_json(StatusCode::CREATED, "create review comment")?)
    }

    /// Fetches the pull request as a unified diff.
    ///
    /// A pull request GitHub no longer has yields an empty diff.
    ///
    /// # Errors
    ///
    /// Returns an error for failing statuses other than `404 Not Found`.
    pub async fn diff(&self, pull: &PullRequest) -> Result<Vec<u8>, PullsError> {
        self.representation(pull, MediaType::Diff, "fetch diff").await
    }

    /// Fetches the pull request as a mail-formatted patch series.
    ///
    /// # Errors
    ///
    /// See [`PullRequests::diff`].
    pub async fn patch(&self, pull: &PullRequest) -> Result<Vec<u8>, PullsError> {
        self.representation(pull, MediaType::Patch, "fetch patch")
            .await
    }

    /// Reports whether the pull request has been merged.
    ///
    /// Trusts a `merged` flag already present on the record; otherwise asks
    /// GitHub.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails with a status other than
    /// `204 No Content` or `404 Not Found`.
    pub async fn is_merged(&self, pull: &PullRequest) -> Result<bool, PullsError> {
        if pull.merged == Some(true) {
            return Ok(true);
        }
        let response = self
            .transport
            .send(ApiRequest::get(format!("{}/merge", pull.url)))
            .await?;
        response.expect_boolean(StatusCode::NO_CONTENT, StatusCode::NOT_FOUND, "check merged")
    }

    /// Fetches the issue backing the pull request.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the payload is malformed.
    pub async fn issue(&self, pull: &PullRequest) -> Result<Option<Issue>, PullsError> {
        let url = pull
            .issue_url
            .clone()
            .unwrap_or_else(|| issues_url(&pull.url));
        let response = self.transport.send(ApiRequest::get(url)).await?;
        optional(response.expect_json(StatusCode::OK, "fetch issue")?)
    }

    /// Lists the commits on the pull request.
    #[must_use]
    pub fn commits(
        &self,
        pull: &PullRequest,
        options: ListOptions,
    ) -> Pages<'client, T, RepoCommit> {
        self.listing(format!("{}/commits", pull.url), options, "list commits")
    }

    /// Lists the files the pull request changes.
    #[must_use]
    pub fn files(&self, pull: &PullRequest, options: ListOptions) -> Pages<'client, T, PullFile> {
        self.listing(format!("{}/files", pull.url), options, "list files")
    }

    /// Lists discussion comments on the pull request's issue thread.
    #[must_use]
    pub fn issue_comments(
        &self,
        pull: &PullRequest,
        options: ListOptions,
    ) -> Pages<'client, T, IssueComment> {
        let url = pull
            .links
            .get("comments")
            .map_or_else(|| issue_comments_fallback(&pull.url), ToOwned::to_owned);
        self.listing(url, options, "list issue comments")
    }

    /// Lists review comments on the pull request's diff.
    #[must_use]
    pub fn review_comments(
        &self,
        pull: &PullRequest,
        options: ListOptions,
    ) -> Pages<'client, T, ReviewComment> {
        self.listing(
            format!("{}/comments", pull.url),
            options,
            "list review comments",
        )
    }

    /// Lists submitted reviews.
    #[must_use]
    pub fn reviews(&self, pull: &PullRequest, options: ListOptions) -> Pages<'client, T, PullReview> {
        let request = ApiRequest::get(format!("{}/reviews", pull.url))
            .with_accept(MediaType::ReviewsPreview);
        Pages::new(self.transport, request, options, "list reviews")
    }

    /// Merges the pull request.
    ///
    /// Returns GitHub's `merged` flag, or `false` when the response carries
    /// no body.
    ///
    /// # Errors
    ///
    /// Returns an error when GitHub refuses the merge, for example because
    /// the pull request is not mergeable or `sha` no longer matches the head.
    pub async fn merge(
        &self,
        pull: &PullRequest,
        options: &MergeOptions,
    ) -> Result<bool, PullsError> {
        debug!(number = pull.number, squash = options.squash, "merging pull request");
        let response = self
            .transport
            .send(ApiRequest::put(format!("{}/merge", pull.url), options.to_json()))
            .await?;
        let merged = response
            .expect_json(StatusCode::OK, "merge pull request")?
            .and_then(|value| value.get("merged").and_then(Value::as_bool))
            .unwrap_or(false);
        Ok(merged)
    }

    /// Fetches a changed file's contents at the head commit.
    ///
    /// Returns `Ok(None)` when the file has no contents URL or GitHub answers
    /// without a body.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the payload is malformed.
    pub async fn file_contents(&self, file: &PullFile) -> Result<Option<Contents>, PullsError> {
        let Some(url) = file.contents_url.as_deref() else {
            warn!(filename = %file.filename, "file has no contents URL");
            return Ok(None);
        };
        let response = self.transport.send(ApiRequest::get(url)).await?;
        optional(response.expect_json(StatusCode::OK, "fetch file contents")?)
    }

    /// Replies to a review comment in its thread.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::InvalidArgument` when the comment does not record
    /// its pull request, or an error when GitHub rejects the reply.
    pub async fn reply(
        &self,
        comment: &ReviewComment,
        body: &str,
    ) -> Result<Option<ReviewComment>, PullsError> {
        let Some(pull_url) = comment.pull_request_url.as_deref() else {
            return Err(PullsError::InvalidArgument {
                argument: format!("review comment {} has no pull request URL", comment.id),
            });
        };
        let payload = json!({ "body": body, "in_reply_to": comment.id });
        let response = self
            .transport
            .send(ApiRequest::post(format!("{pull_url}/comments"), payload))
            .await?;
        optional(response.expect_json(StatusCode::CREATED, "reply to review comment")?)
    }

    fn listing<R>(
        &self,
        url: String,
        options: ListOptions,
        operation: &'static str,
    ) -> Pages<'client, T, R>
    where
        R: FromWire,
    {
        Pages::new(self.transport, ApiRequest::get(url), options, operation)
    }

    async fn representation(
        &self,
        pull: &PullRequest,
        media_type: MediaType,
        operation: &'static str,
    ) -> Result<Vec<u8>, PullsError> {
        let request = ApiRequest::get(pull.url.as_str()).with_accept(media_type);
        let response = self.transport.send(request).await?;
        if response.status() == StatusCode::OK {
            return Ok(response.into_body());
        }
        if response.status() == StatusCode::NOT_FOUND {
            warn!(number = pull.number, operation, "pull request not found; returning empty body");
            return Ok(Vec::new());
        }
        response.error_for_status(operation)?;
        Ok(Vec::new())
    }
}

fn state_change(pull: &PullRequest, state: StateChange) -> PullRequestUpdate {
    PullRequestUpdate {
        title: Some(pull.title.clone()),
        body: pull.body.clone(),
        state: Some(state),
    }
}

/// Maps a pull request API URL onto its issue URL.
fn issues_url(pull_url: &str) -> String {
    pull_url.rsplit_once("/pulls/").map_or_else(
        || pull_url.to_owned(),
        |(repository, number)| format!("{repository}/issues/{number}"),
    )
}

fn issue_comments_fallback(pull_url: &str) -> String {
    format!("{}/comments", issues_url(pull_url))
}
