//! GitHub account summary embedded in most records.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::{FromWire, decode};
use crate::github::error::PullsError;

/// Account that authored, merged, or was assigned to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Login name.
    pub login: String,
    /// Numeric account identifier.
    pub id: u64,
    /// Profile page URL.
    pub html_url: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// API URL of the account.
    pub url: Option<String>,
    /// Account kind such as `User`, `Bot`, or `Organization`.
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    login: String,
    #[serde(default)]
    id: u64,
    html_url: Option<String>,
    avatar_url: Option<String>,
    url: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl From<ApiUser> for User {
    fn from(value: ApiUser) -> Self {
        Self {
            login: value.login,
            id: value.id,
            html_url: value.html_url,
            avatar_url: value.avatar_url,
            url: value.url,
            kind: value.kind,
        }
    }
}

impl FromWire for User {
    const RESOURCE: &'static str = "user";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiUser>(value, Self::RESOURCE).map(Self::from)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.login)
    }
}
