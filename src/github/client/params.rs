//! Request parameters for pull request operations.

use serde_json::{Map, Value};

/// Pull request state filter for listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestState {
    /// Only open pull requests.
    #[default]
    Open,
    /// Only closed pull requests.
    Closed,
    /// All pull requests regardless of state.
    All,
}

impl PullRequestState {
    /// Returns the API parameter value for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Ordering key for pull request listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestSort {
    /// Creation time.
    #[default]
    Created,
    /// Last update time.
    Updated,
    /// Comment activity.
    Popularity,
    /// Age of the pull request weighted by activity.
    LongRunning,
}

impl PullRequestSort {
    /// Returns the API parameter value for this key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Popularity => "popularity",
            Self::LongRunning => "long-running",
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Oldest or smallest first.
    Asc,
    /// Newest or largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the API parameter value for this order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters for listing a repository's pull requests.
///
/// Unset filters are omitted so GitHub applies its own defaults (open pull
/// requests, newest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPullRequests {
    /// Filter by state.
    pub state: Option<PullRequestState>,
    /// Filter by head branch as `user:ref-name`.
    pub head: Option<String>,
    /// Filter by base branch name.
    pub base: Option<String>,
    /// Ordering key.
    pub sort: Option<PullRequestSort>,
    /// Ordering direction.
    pub direction: Option<SortDirection>,
}

impl ListPullRequests {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(state) = self.state {
            pairs.push(("state", state.as_str().to_owned()));
        }
        if let Some(head) = &self.head {
            pairs.push(("head", head.clone()));
        }
        if let Some(base) = &self.base {
            pairs.push(("base", base.clone()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_owned()));
        }
        if let Some(direction) = self.direction {
            pairs.push(("direction", direction.as_str().to_owned()));
        }
        pairs
    }
}

/// Payload for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Title.
    pub title: String,
    /// Branch carrying the changes, `user:branch` for cross-repository heads.
    pub head: String,
    /// Branch to merge into.
    pub base: String,
    /// Markdown body.
    pub body: Option<String>,
    /// Opens the pull request as a draft.
    pub draft: bool,
}

impl NewPullRequest {
    /// Creates a payload with no body that is ready for review.
    #[must_use]
    pub fn new(title: impl Into<String>, head: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            head: head.into(),
            base: base.into(),
            body: None,
            draft: false,
        }
    }

    pub(crate) fn to_json(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("title".to_owned(), Value::from(self.title.as_str()));
        payload.insert("head".to_owned(), Value::from(self.head.as_str()));
        payload.insert("base".to_owned(), Value::from(self.base.as_str()));
        if let Some(body) = &self.body {
            payload.insert("body".to_owned(), Value::from(body.as_str()));
        }
        if self.draft {
            payload.insert("draft".to_owned(), Value::Bool(true));
        }
        Value::Object(payload)
    }
}

/// State a pull request can be moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Reopen.
    Open,
    /// Close without merging.
    Closed,
}

impl StateChange {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Fields to change on an existing pull request; `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestUpdate {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
    /// New state.
    pub state: Option<StateChange>,
}

impl PullRequestUpdate {
    /// Returns true when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.state.is_none()
    }

    pub(crate) fn to_json(&self) -> Value {
        let mut payload = Map::new();
        if let Some(title) = &self.title {
            payload.insert("title".to_owned(), Value::from(title.as_str()));
        }
        if let Some(body) = &self.body {
            payload.insert("body".to_owned(), Value::from(body.as_str()));
        }
        if let Some(state) = self.state {
            payload.insert("state".to_owned(), Value::from(state.as_str()));
        }
        Value::Object(payload)
    }
}

/// A new review comment anchored to a diff position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReviewComment {
    /// Markdown body.
    pub body: String,
    /// Commit the position refers to.
    pub commit_id: String,
    /// File path within the diff.
    pub path: String,
    /// Line index within the file's diff.
    pub position: u64,
}

impl NewReviewComment {
    pub(crate) fn to_json(&self) -> Value {
        serde_json::json!({
            "body": self.body,
            "commit_id": self.commit_id,
            "path": self.path,
            "position": self.position,
        })
    }
}

/// Options for merging a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Extra detail appended to the merge commit message.
    pub commit_message: Option<String>,
    /// Head SHA the merge must match; the merge fails if the head moved.
    pub sha: Option<String>,
    /// Squashes the commits into one.
    pub squash: bool,
}

impl MergeOptions {
    pub(crate) fn to_json(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("squash".to_owned(), Value::Bool(self.squash));
        if let Some(sha) = &self.sha {
            payload.insert("sha".to_owned(), Value::from(sha.as_str()));
        }
        if let Some(message) = &self.commit_message {
            payload.insert("commit_message".to_owned(), Value::from(message.as_str()));
        }
        Value::Object(payload)
    }
}
