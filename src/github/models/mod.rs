//! Records decoded from GitHub pull request payloads.
//!
//! Types prefixed with `Api` are private deserialisation targets mirroring the
//! wire format; they convert into the public records through `From`. Every
//! public record implements [`FromWire`], so callers holding raw JSON (for
//! example from a webhook) can build the same records the client returns.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::PullsError;

mod commit;
mod contents;
mod issue;
mod pull_file;
mod pull_request;
mod repository;
mod review;
mod review_comment;
mod user;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use commit::RepoCommit;
pub use contents::Contents;
pub use issue::{Issue, IssueComment};
pub use pull_file::PullFile;
pub use pull_request::{Direction, PullDestination, PullRequest};
pub use repository::RepositorySummary;
pub use review::PullReview;
pub use review_comment::ReviewComment;
pub use user::User;

/// Records that can be built from a GitHub wire JSON object.
pub trait FromWire: Sized {
    /// Human-readable record name used in decode errors.
    const RESOURCE: &'static str;

    /// Decodes the record from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`PullsError::Decode`] when required fields are missing or
    /// have the wrong type.
    fn from_wire(value: Value) -> Result<Self, PullsError>;
}

/// Deserialises a wire value, tagging failures with the record name.
pub(super) fn decode<T: DeserializeOwned>(
    value: Value,
    resource: &'static str,
) -> Result<T, PullsError> {
    serde_json::from_value(value).map_err(|error| PullsError::Decode {
        resource,
        message: error.to_string(),
    })
}

/// Hypermedia links attached to a record (`_links` on the wire).
///
/// Each entry maps a relation such as `self`, `html`, or `comments` to its
/// target URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(BTreeMap<String, String>);

impl Links {
    /// Returns the target URL for a relation.
    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&str> {
        self.0.get(relation).map(String::as_str)
    }

    /// Returns true when no links were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(relation, url)` pairs in relation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(relation, href)| (relation.as_str(), href.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiLink {
    href: Option<String>,
}

impl From<Option<BTreeMap<String, ApiLink>>> for Links {
    fn from(value: Option<BTreeMap<String, ApiLink>>) -> Self {
        Self(
            value
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(relation, link)| link.href.map(|href| (relation, href)))
                .collect(),
        )
    }
}
