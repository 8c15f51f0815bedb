//! Raw GitHub API responses and the status conventions shared by operations.

use http::header::{ETAG, HeaderMap, HeaderName, HeaderValue, LINK};
use http::StatusCode;
use serde_json::Value;

use crate::github::error::PullsError;

use super::error_mapping::map_http_error;
use super::http_utils::{extract_github_message, header_to_string, parse_next_link};

/// Status, headers, and body of a GitHub API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Creates a response carrying a serialised JSON body.
    #[must_use]
    pub fn from_json(status: StatusCode, value: &Value) -> Self {
        Self::new(status, HeaderMap::new(), value.to_string())
    }

    /// Creates a response with no body.
    #[must_use]
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, HeaderMap::new(), Vec::new())
    }

    /// Adds a header, ignoring values that are not valid header text.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(header_value) = HeaderValue::from_str(value) {
            self.headers.insert(name, header_value);
        }
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the response, returning the body bytes.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// `ETag` validator returned by GitHub, if any.
    #[must_use]
    pub fn etag(&self) -> Option<String> {
        header_to_string(self.headers.get(ETAG))
    }

    /// URL of the next page advertised in the `Link` header, if any.
    #[must_use]
    pub fn next_link(&self) -> Option<String> {
        self.headers
            .get(LINK)
            .and_then(|raw| raw.to_str().ok())
            .and_then(parse_next_link)
    }

    /// Parses the body as JSON; an empty body yields `None`.
    pub(crate) fn json_value(&self, resource: &'static str) -> Result<Option<Value>, PullsError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(|error| PullsError::Decode {
                resource,
                message: error.to_string(),
            })
    }

    /// Fails with a mapped error when the status is a client or server error.
    pub(crate) fn error_for_status(&self, operation: &str) -> Result<(), PullsError> {
        if self.status.is_client_error() || self.status.is_server_error() {
            let body = String::from_utf8_lossy(&self.body);
            return Err(map_http_error(
                operation,
                self.status,
                extract_github_message(&body),
            ));
        }
        Ok(())
    }

    /// Returns the JSON body when the status equals `expected`.
    ///
    /// Error statuses fail; any other status yields `None`.
    pub(crate) fn expect_json(
        &self,
        expected: StatusCode,
        operation: &'static str,
    ) -> Result<Option<Value>, PullsError> {
        if self.status == expected {
            return self.json_value(operation);
        }
        self.error_for_status(operation)?;
        Ok(None)
    }

    /// Interprets the status as a boolean answer.
    ///
    /// `true_code` yields `true`, `false_code` yields `false`, error statuses
    /// fail, and anything else yields `false`.
    pub(crate) fn expect_boolean(
        &self,
        true_code: StatusCode,
        false_code: StatusCode,
        operation: &str,
    ) -> Result<bool, PullsError> {
        if self.status == true_code {
            return Ok(true);
        }
        if self.status != false_code {
            self.error_for_status(operation)?;
        }
        Ok(false)
    }
}
