//! File contents fetched through the contents API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;

use super::{FromWire, decode};
use crate::github::error::PullsError;

/// A file blob returned by the contents API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contents {
    /// File name.
    pub name: String,
    /// Path within the repository.
    pub path: String,
    /// Blob SHA.
    pub sha: String,
    /// Size in bytes.
    pub size: u64,
    /// Entry kind, normally `file`.
    pub kind: String,
    /// Content encoding, normally `base64`.
    pub encoding: Option<String>,
    /// Encoded content.
    pub content: Option<String>,
    /// API URL.
    pub url: Option<String>,
    /// Page URL.
    pub html_url: Option<String>,
    /// Raw download URL.
    pub download_url: Option<String>,
}

impl Contents {
    /// Decodes the content when it is base64 encoded.
    ///
    /// Returns `Ok(None)` when there is no content or it uses another
    /// encoding. GitHub wraps base64 lines, so whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PullsError::Decode`] when the base64 payload is invalid.
    pub fn decoded(&self) -> Result<Option<Vec<u8>>, PullsError> {
        if self.encoding.as_deref() != Some("base64") {
            return Ok(None);
        }
        let Some(content) = self.content.as_deref() else {
            return Ok(None);
        };
        let compact: String = content.split_whitespace().collect();
        STANDARD
            .decode(compact)
            .map(Some)
            .map_err(|error| PullsError::Decode {
                resource: Self::RESOURCE,
                message: error.to_string(),
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ApiContents {
    name: String,
    path: String,
    sha: String,
    #[serde(default)]
    size: u64,
    #[serde(rename = "type", default)]
    kind: String,
    encoding: Option<String>,
    content: Option<String>,
    url: Option<String>,
    html_url: Option<String>,
    download_url: Option<String>,
}

impl From<ApiContents> for Contents {
    fn from(value: ApiContents) -> Self {
        Self {
            name: value.name,
            path: value.path,
            sha: value.sha,
            size: value.size,
            kind: value.kind,
            encoding: value.encoding,
            content: value.content,
            url: value.url,
            html_url: value.html_url,
            download_url: value.download_url,
        }
    }
}

impl FromWire for Contents {
    const RESOURCE: &'static str = "contents";

    fn from_wire(value: Value) -> Result<Self, PullsError> {
        decode::<ApiContents>(value, Self::RESOURCE).map(Self::from)
    }
}
