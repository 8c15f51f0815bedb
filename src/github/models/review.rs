//! Submitted pull request reviews.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::user::ApiUser;
use super::{FromWire, User, decode};
use crate::github::error::PullsError;

/// A review left on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullReview {
    /// Numeric identifier.
    pub id: u64,
    /// Commit the review was made against.
    pub commit_id: Option<String>,
    /// Reviewer.
    pub user: Option<User>,
    /// Review state such as `APPROVED` or `CHANGES_REQUESTED`.
    pub state: String,
    /// Submission time; pending reviews fall back to their creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Review summary text.
    pub body: Option<String>,
    /// API URL of the reviewed pull request.
    pub pull_request_url: Option<String>,
    /// Review page URL.
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiReview {
    id: u64,
    commit_id: Option<String>,
    user: Option<ApiUser>,
    #[serde(default)]
    state: String,
    submitted_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    body: Option<String>,
    pull_request_url: Option<String>,
    html_url: Option<String>,
}

impl From<ApiReview> for PullReview {
    fn from(value: ApiReview) -> Self {
        Self {
            id: value.id,
            commit_id: value.commit_id,
            user: value.user.map(User::from),
            state: value.state,
            created_at: value.submitted_at.or(value.created_at),
            body: value.body,
            pull_request_url: value.pull_request_url,
            html_url: value.html_url,
        }
    }
}

impl FromWire for PullReview {
    const RESOURCE: &'static str = "pull request review";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiReview>(value, Self::RESOURCE).map(Self::from)
    }
}

impl fmt::Display for PullReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Pull Request Review [{}]>", self.id)
    }
}
