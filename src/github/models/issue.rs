//! The issue backing a pull request and its discussion comments.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::user::ApiUser;
use super::{FromWire, User, decode};
use crate::github::error::PullsError;

/// Issue view of a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Numeric identifier.
    pub id: u64,
    /// Repository-scoped number, shared with the pull request.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Markdown body.
    pub body: Option<String>,
    /// `open` or `closed`.
    pub state: String,
    /// API URL.
    pub url: Option<String>,
    /// Page URL.
    pub html_url: Option<String>,
    /// Author.
    pub user: Option<User>,
    /// Label names.
    pub labels: Vec<String>,
    /// Discussion comment count.
    pub comments_count: u64,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close time.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Discussion comment on a pull request's issue thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Numeric identifier.
    pub id: u64,
    /// API URL.
    pub url: Option<String>,
    /// Page URL.
    pub html_url: Option<String>,
    /// Markdown body.
    pub body: Option<String>,
    /// Author.
    pub user: Option<User>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiLabel {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiIssue {
    id: u64,
    number: u64,
    #[serde(default)]
    title: String,
    body: Option<String>,
    #[serde(default)]
    state: String,
    url: Option<String>,
    html_url: Option<String>,
    user: Option<ApiUser>,
    #[serde(default)]
    labels: Vec<ApiLabel>,
    #[serde(default)]
    comments: u64,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiIssueComment {
    id: u64,
    url: Option<String>,
    html_url: Option<String>,
    body: Option<String>,
    user: Option<ApiUser>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            body: value.body,
            state: value.state,
            url: value.url,
            html_url: value.html_url,
            user: value.user.map(User::from),
            labels: value.labels.into_iter().map(|label| label.name).collect(),
            comments_count: value.comments,
            created_at: value.created_at,
            updated_at: value.updated_at,
            closed_at: value.closed_at,
        }
    }
}

impl From<ApiIssueComment> for IssueComment {
    fn from(value: ApiIssueComment) -> Self {
        Self {
            id: value.id,
            url: value.url,
            html_url: value.html_url,
            body: value.body,
            user: value.user.map(User::from),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl FromWire for Issue {
    const RESOURCE: &'static str = "issue";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiIssue>(value, Self::RESOURCE).map(Self::from)
    }
}

impl FromWire for IssueComment {
    const RESOURCE: &'static str = "issue comment";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiIssueComment>(value, Self::RESOURCE).map(Self::from)
    }
}
