//! Repository summary embedded in pull request destinations.

use serde::Deserialize;
use serde_json::Value;

use super::user::ApiUser;
use super::{FromWire, User, decode};
use crate::github::error::PullsError;

/// Minimal repository description carried by a `base` or `head` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySummary {
    /// Numeric repository identifier.
    pub id: u64,
    /// Repository name without the owner.
    pub name: String,
    /// `owner/name` form.
    pub full_name: Option<String>,
    /// Owning account.
    pub owner: Option<User>,
    /// Repository page URL.
    pub html_url: Option<String>,
    /// API URL of the repository.
    pub url: Option<String>,
    /// Default branch name.
    pub default_branch: Option<String>,
}

impl RepositorySummary {
    /// Returns the owner login, falling back to the `full_name` prefix.
    #[must_use]
    pub fn owner_login(&self) -> Option<&str> {
        self.owner.as_ref().map(|owner| owner.login.as_str()).or_else(|| {
            self.full_name
                .as_deref()
                .and_then(|full| full.split_once('/'))
                .map(|(owner, _)| owner)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepositorySummary {
    #[serde(default)]
    id: u64,
    name: String,
    full_name: Option<String>,
    owner: Option<ApiUser>,
    html_url: Option<String>,
    url: Option<String>,
    default_branch: Option<String>,
}

impl From<ApiRepositorySummary> for RepositorySummary {
    fn from(value: ApiRepositorySummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            full_name: value.full_name,
            owner: value.owner.map(User::from),
            html_url: value.html_url,
            url: value.url,
            default_branch: value.default_branch,
        }
    }
}

impl FromWire for RepositorySummary {
    const RESOURCE: &'static str = "repository";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiRepositorySummary>(value, Self::RESOURCE).map(Self::from)
    }
}
