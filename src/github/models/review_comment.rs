//! Comments attached to lines of a pull request diff.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::user::ApiUser;
use super::{ApiLink, FromWire, Links, User, decode};
use crate::github::error::PullsError;

/// A review comment on a specific diff position.
///
/// Review comments differ from issue comments: they anchor to a path and
/// position in the diff and may reply to another review comment. Equality
/// compares identifiers only.
#[derive(Debug, Clone)]
pub struct ReviewComment {
    /// Numeric identifier.
    pub id: u64,
    /// API URL of the comment.
    pub url: Option<String>,
    /// Markdown body.
    pub body: Option<String>,
    /// Body rendered as plain text, when requested.
    pub body_text: Option<String>,
    /// Body rendered as HTML, when requested.
    pub body_html: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Comment page URL.
    pub html_url: Option<String>,
    /// Hypermedia links.
    pub links: Links,
    /// Author.
    pub user: Option<User>,
    /// File path the comment is attached to.
    pub path: Option<String>,
    /// Line index in the current diff; `None` once the line is outdated.
    pub position: Option<u64>,
    /// Line index in the diff the comment was originally made against.
    pub original_position: Option<u64>,
    /// Commit the comment currently applies to.
    pub commit_id: Option<String>,
    /// Commit the comment was originally made against.
    pub original_commit_id: Option<String>,
    /// Diff hunk surrounding the comment.
    pub diff_hunk: Option<String>,
    /// API URL of the pull request.
    pub pull_request_url: Option<String>,
    /// Comment this one replies to.
    pub in_reply_to_id: Option<u64>,
}

impl PartialEq for ReviewComment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ReviewComment {}

impl fmt::Display for ReviewComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let login = self.user.as_ref().map_or("", |user| user.login.as_str());
        write!(f, "<Review Comment [{login}]>")
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiReviewComment {
    id: u64,
    url: Option<String>,
    body: Option<String>,
    body_text: Option<String>,
    body_html: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    html_url: Option<String>,
    #[serde(rename = "_links")]
    links: Option<BTreeMap<String, ApiLink>>,
    user: Option<ApiUser>,
    path: Option<String>,
    position: Option<u64>,
    original_position: Option<u64>,
    commit_id: Option<String>,
    original_commit_id: Option<String>,
    diff_hunk: Option<String>,
    pull_request_url: Option<String>,
    in_reply_to_id: Option<u64>,
}

impl From<ApiReviewComment> for ReviewComment {
    fn from(value: ApiReviewComment) -> Self {
        Self {
            id: value.id,
            url: value.url,
            body: value.body,
            body_text: value.body_text,
            body_html: value.body_html,
            created_at: value.created_at,
            updated_at: value.updated_at,
            html_url: value.html_url,
            links: Links::from(value.links),
            user: value.user.map(User::from),
            path: value.path,
            position: value.position,
            original_position: value.original_position,
            commit_id: value.commit_id,
            original_commit_id: value.original_commit_id,
            diff_hunk: value.diff_hunk,
            pull_request_url: value.pull_request_url,
            in_reply_to_id: value.in_reply_to_id,
        }
    }
}

impl FromWire for ReviewComment {
    const RESOURCE: &'static str = "review comment";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiReviewComment>(value, Self::RESOURCE).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ReviewComment;
    use crate::github::models::FromWire;
    use crate::github::models::test_support::review_comment_json;

    #[rstest]
    fn decodes_diff_anchor() {
        let comment = ReviewComment::from_wire(review_comment_json(11, "octo", "widgets", 42))
            .expect("comment should decode");

        assert_eq!(comment.path.as_deref(), Some("src/lib.rs"));
        assert_eq!(comment.position, Some(4));
        assert_eq!(comment.original_position, Some(4));
        assert_eq!(
            comment.pull_request_url.as_deref(),
            Some("https://api.github.com/repos/octo/widgets/pulls/42")
        );
        assert_eq!(comment.to_string(), "<Review Comment [bob]>");
    }

    #[rstest]
    fn outdated_position_is_none() {
        let mut wire = review_comment_json(11, "octo", "widgets", 42);
        wire["position"] = serde_json::Value::Null;

        let comment = ReviewComment::from_wire(wire).expect("comment should decode");

        assert!(comment.position.is_none());
    }

    #[rstest]
    fn equality_uses_identifier_only() {
        let first = ReviewComment::from_wire(review_comment_json(11, "octo", "widgets", 42))
            .expect("should decode");
        let mut second = first.clone();
        second.body = Some("edited".to_owned());

        assert_eq!(first, second);
    }
}
