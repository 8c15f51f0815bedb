//! Files changed by a pull request.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::{FromWire, decode};
use crate::github::error::PullsError;

/// One file in a pull request's diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullFile {
    /// Blob SHA of the file after the change.
    pub sha: Option<String>,
    /// Path of the file.
    pub filename: String,
    /// Change kind such as `added`, `modified`, `removed`, or `renamed`.
    pub status: String,
    /// Lines added.
    pub additions_count: u64,
    /// Lines removed.
    pub deletions_count: u64,
    /// Lines changed.
    pub changes_count: u64,
    /// Blob page URL.
    pub blob_url: Option<String>,
    /// Raw content URL.
    pub raw_url: Option<String>,
    /// Unified diff fragment; absent for binary or very large files.
    pub patch: Option<String>,
    /// Contents API URL at the head commit.
    pub contents_url: Option<String>,
    /// Previous path for renamed files.
    pub previous_filename: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiPullFile {
    sha: Option<String>,
    filename: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    changes: u64,
    blob_url: Option<String>,
    raw_url: Option<String>,
    patch: Option<String>,
    contents_url: Option<String>,
    previous_filename: Option<String>,
}

impl From<ApiPullFile> for PullFile {
    fn from(value: ApiPullFile) -> Self {
        Self {
            sha: value.sha,
            filename: value.filename,
            status: value.status,
            additions_count: value.additions,
            deletions_count: value.deletions,
            changes_count: value.changes,
            blob_url: value.blob_url,
            raw_url: value.raw_url,
            patch: value.patch,
            contents_url: value.contents_url,
            previous_filename: value.previous_filename,
        }
    }
}

impl FromWire for PullFile {
    const RESOURCE: &'static str = "pull request file";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiPullFile>(value, Self::RESOURCE).map(Self::from)
    }
}

impl fmt::Display for PullFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Pull Request File [{}]>", self.filename)
    }
}
