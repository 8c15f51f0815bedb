//! Pull requests and their `base`/`head` destinations.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::repository::ApiRepositorySummary;
use super::user::ApiUser;
use super::{ApiLink, FromWire, Links, RepositorySummary, User, decode};
use crate::github::error::PullsError;

/// Which side of a pull request a destination describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The branch the changes merge into.
    Base,
    /// The branch carrying the changes.
    Head,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "Base",
            Self::Head => "Head",
        })
    }
}

/// One end of a pull request: a branch in some repository at some commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullDestination {
    /// Whether this is the base or the head.
    pub direction: Direction,
    /// Branch name (`ref` on the wire).
    pub ref_name: String,
    /// `owner:branch` label.
    pub label: String,
    /// Owner of the branch's repository.
    pub user: Option<User>,
    /// Commit the branch pointed at.
    pub sha: String,
    /// Repository holding the branch; absent when it has been deleted.
    pub repository: Option<RepositorySummary>,
    /// `(owner, name)` of the repository, empty when no repository is present.
    pub repo: (String, String),
}

impl PullDestination {
    /// Decodes a `base` or `head` object.
    ///
    /// # Errors
    ///
    /// Returns [`PullsError::Decode`] when the object is malformed.
    pub fn from_wire(value: Value, direction: Direction) -> Result<Self, PullsError> {
        decode::<ApiDestination>(value, "pull request destination")
            .map(|api| Self::from_api(api, direction))
    }

    fn from_api(value: ApiDestination, direction: Direction) -> Self {
        let repository = value.repo.map(RepositorySummary::from);
        let repo = repository
            .as_ref()
            .map(|summary| {
                let owner = summary.owner_login().unwrap_or_default().to_owned();
                (owner, summary.name.clone())
            })
            .unwrap_or_default();
        Self {
            direction,
            ref_name: value.ref_name,
            label: value.label,
            user: value.user.map(User::from),
            sha: value.sha,
            repository,
            repo,
        }
    }
}

impl fmt::Display for PullDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} [{}]>", self.direction, self.label)
    }
}

/// A pull request as returned by the pulls API.
///
/// Equality compares identifiers only, so two snapshots of the same pull
/// request taken at different times are equal.
#[derive(Debug, Clone)]
pub struct PullRequest {
    /// API URL of the pull request; every follow-on operation derives from it.
    pub url: String,
    /// Numeric identifier.
    pub id: u64,
    /// Repository-scoped number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Markdown body.
    pub body: Option<String>,
    /// Body rendered as HTML, when requested.
    pub body_html: Option<String>,
    /// Body rendered as plain text, when requested.
    pub body_text: Option<String>,
    /// `open` or `closed`.
    pub state: String,
    /// Whether the pull request is a draft.
    pub draft: bool,
    /// Whether the conversation is locked.
    pub locked: bool,
    /// Branch the changes merge into.
    pub base: Option<PullDestination>,
    /// Branch carrying the changes.
    pub head: Option<PullDestination>,
    /// `(owner, name)` of the base repository.
    pub repository: Option<(String, String)>,
    /// Author.
    pub user: Option<User>,
    /// Primary assignee.
    pub assignee: Option<User>,
    /// All assignees.
    pub assignees: Vec<User>,
    /// Users asked to review.
    pub requested_reviewers: Vec<User>,
    /// Whether the pull request has been merged; absent in list payloads.
    pub merged: Option<bool>,
    /// Whether GitHub considers the pull request mergeable.
    pub mergeable: bool,
    /// Detailed mergeability such as `clean` or `dirty`.
    pub mergeable_state: Option<String>,
    /// Account that merged the pull request.
    pub merged_by: Option<User>,
    /// Lines added.
    pub additions_count: Option<u64>,
    /// Lines removed.
    pub deletions_count: Option<u64>,
    /// Issue comment count.
    pub comments_count: Option<u64>,
    /// Review comment count.
    pub review_comments_count: Option<u64>,
    /// Commit count.
    pub commits_count: Option<u64>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close time.
    pub closed_at: Option<DateTime<Utc>>,
    /// Merge time.
    pub merged_at: Option<DateTime<Utc>>,
    /// Page URL.
    pub html_url: Option<String>,
    /// Diff download URL.
    pub diff_url: Option<String>,
    /// Patch download URL.
    pub patch_url: Option<String>,
    /// URL of the backing issue.
    pub issue_url: Option<String>,
    /// Issue comments collection URL.
    pub comments_url: Option<String>,
    /// Commits collection URL.
    pub commits_url: Option<String>,
    /// Review comments collection URL.
    pub review_comments_url: Option<String>,
    /// URI template for a single review comment (`{/number}`).
    pub review_comment_url: Option<String>,
    /// Commit statuses URL for the head commit.
    pub statuses_url: Option<String>,
    /// Hypermedia links.
    pub links: Links,
}

impl PullRequest {
    /// Expands `review_comment_url` for a specific comment number.
    #[must_use]
    pub fn review_comment_url_for(&self, number: u64) -> Option<String> {
        self.review_comment_url.as_deref().map(|template| {
            template
                .replace("{/number}", &format!("/{number}"))
                .replace("{number}", &number.to_string())
        })
    }
}

impl PartialEq for PullRequest {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PullRequest {}

impl fmt::Display for PullRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Pull Request [#{}]>", self.number)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiDestination {
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(default)]
    label: String,
    user: Option<ApiUser>,
    sha: String,
    repo: Option<ApiRepositorySummary>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiPullRequest {
    url: String,
    id: u64,
    number: u64,
    #[serde(default)]
    title: String,
    body: Option<String>,
    body_html: Option<String>,
    body_text: Option<String>,
    #[serde(default)]
    state: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    locked: bool,
    base: Option<ApiDestination>,
    head: Option<ApiDestination>,
    user: Option<ApiUser>,
    assignee: Option<ApiUser>,
    #[serde(default)]
    assignees: Vec<ApiUser>,
    #[serde(default)]
    requested_reviewers: Vec<ApiUser>,
    merged: Option<bool>,
    mergeable: Option<bool>,
    mergeable_state: Option<String>,
    merged_by: Option<ApiUser>,
    additions: Option<u64>,
    deletions: Option<u64>,
    comments: Option<u64>,
    review_comments: Option<u64>,
    commits: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    merged_at: Option<DateTime<Utc>>,
    html_url: Option<String>,
    diff_url: Option<String>,
    patch_url: Option<String>,
    issue_url: Option<String>,
    comments_url: Option<String>,
    commits_url: Option<String>,
    review_comments_url: Option<String>,
    review_comment_url: Option<String>,
    statuses_url: Option<String>,
    #[serde(rename = "_links")]
    links: Option<BTreeMap<String, ApiLink>>,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        let base = value
            .base
            .map(|api| PullDestination::from_api(api, Direction::Base));
        let head = value
            .head
            .map(|api| PullDestination::from_api(api, Direction::Head));
        let repository = base.as_ref().map(|destination| destination.repo.clone());

        Self {
            url: value.url,
            id: value.id,
            number: value.number,
            title: value.title,
            body: value.body,
            body_html: value.body_html,
            body_text: value.body_text,
            state: value.state,
            draft: value.draft,
            locked: value.locked,
            base,
            head,
            repository,
            user: value.user.map(User::from),
            assignee: value.assignee.map(User::from),
            assignees: value.assignees.into_iter().map(User::from).collect(),
            requested_reviewers: value
                .requested_reviewers
                .into_iter()
                .map(User::from)
                .collect(),
            merged: value.merged,
            mergeable: value.mergeable.unwrap_or(false),
            mergeable_state: value.mergeable_state,
            merged_by: value.merged_by.map(User::from),
            additions_count: value.additions,
            deletions_count: value.deletions,
            comments_count: value.comments,
            review_comments_count: value.review_comments,
            commits_count: value.commits,
            created_at: value.created_at,
            updated_at: value.updated_at,
            closed_at: value.closed_at,
            merged_at: value.merged_at,
            html_url: value.html_url,
            diff_url: value.diff_url,
            patch_url: value.patch_url,
            issue_url: value.issue_url,
            comments_url: value.comments_url,
            commits_url: value.commits_url,
            review_comments_url: value.review_comments_url,
            review_comment_url: value.review_comment_url,
            statuses_url: value.statuses_url,
            links: Links::from(value.links),
        }
    }
}

impl FromWire for PullRequest {
    const RESOURCE: &'static str = "pull request";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiPullRequest>(value, Self::RESOURCE).map(Self::from)
    }
}
