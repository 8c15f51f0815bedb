//! Commits listed on a pull request.

use serde::Deserialize;
use serde_json::Value;

use super::user::ApiUser;
use super::{FromWire, User, decode};
use crate::github::error::PullsError;

/// A commit included in a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCommit {
    /// Commit SHA.
    pub sha: String,
    /// API URL.
    pub url: Option<String>,
    /// Page URL.
    pub html_url: Option<String>,
    /// Full commit message.
    pub message: String,
    /// Git author name.
    pub author_name: Option<String>,
    /// Git committer name.
    pub committer_name: Option<String>,
    /// GitHub account matched to the author, if any.
    pub author: Option<User>,
    /// GitHub account matched to the committer, if any.
    pub committer: Option<User>,
}

impl RepoCommit {
    /// First line of the commit message.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiSignature {
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiGitCommit {
    #[serde(default)]
    message: String,
    author: Option<ApiSignature>,
    committer: Option<ApiSignature>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiRepoCommit {
    sha: String,
    url: Option<String>,
    html_url: Option<String>,
    commit: Option<ApiGitCommit>,
    author: Option<ApiUser>,
    committer: Option<ApiUser>,
}

impl From<ApiRepoCommit> for RepoCommit {
    fn from(value: ApiRepoCommit) -> Self {
        let (message, author_name, committer_name) = value.commit.map_or_else(
            || (String::new(), None, None),
            |commit| {
                (
                    commit.message,
                    commit.author.and_then(|signature| signature.name),
                    commit.committer.and_then(|signature| signature.name),
                )
            },
        );
        Self {
            sha: value.sha,
            url: value.url,
            html_url: value.html_url,
            message,
            author_name,
            committer_name,
            author: value.author.map(User::from),
            committer: value.committer.map(User::from),
        }
    }
}

impl FromWire for RepoCommit {
    const RESOURCE: &'static str = "commit";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiRepoCommit>(value, Self::RESOURCE).map(Self::from)
    }
}
