//! Transport-agnostic description of a GitHub API request.

use http::Method;
use serde_json::Value;

/// Media types the bindings request through the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    /// Standard JSON representation.
    #[default]
    Json,
    /// Unified diff of a pull request.
    Diff,
    /// Mail-formatted patch series of a pull request.
    Patch,
    /// Preview media type historically required for pull request reviews.
    ReviewsPreview,
}

impl MediaType {
    /// Returns the header value for this media type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/vnd.github.v3+json",
            Self::Diff => "application/vnd.github.diff",
            Self::Patch => "application/vnd.github.patch",
            Self::ReviewsPreview => "application/vnd.github.black-cat-preview+json",
        }
    }
}

/// A single HTTP request against the GitHub API.
///
/// `url` is either an absolute URL (as found in wire records) or a path
/// relative to the API base such as `/repos/octo/repo/pulls/1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    accept: Option<MediaType>,
    if_none_match: Option<String>,
    body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, url: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            accept: None,
            if_none_match: None,
            body,
        }
    }

    /// Creates a `GET` request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url, None)
    }

    /// Creates a `POST` request carrying a JSON body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, url, Some(body))
    }

    /// Creates a `PATCH` request carrying a JSON body.
    #[must_use]
    pub fn patch(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, url, Some(body))
    }

    /// Creates a `PUT` request carrying a JSON body.
    #[must_use]
    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, url, Some(body))
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_owned(), value.into()));
        self
    }

    /// Requests a specific representation through the `Accept` header.
    #[must_use]
    pub const fn with_accept(mut self, media_type: MediaType) -> Self {
        self.accept = Some(media_type);
        self
    }

    /// Sets or clears the requested representation.
    #[must_use]
    pub const fn with_optional_accept(mut self, media_type: Option<MediaType>) -> Self {
        self.accept = media_type;
        self
    }

    /// Makes the request conditional on the resource having changed.
    #[must_use]
    pub fn with_if_none_match(mut self, etag: Option<String>) -> Self {
        self.if_none_match = etag;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL or API-relative path, possibly with its own query string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Requested media type, if any.
    #[must_use]
    pub const fn accept(&self) -> Option<MediaType> {
        self.accept
    }

    /// `If-None-Match` validator, if any.
    #[must_use]
    pub fn if_none_match(&self) -> Option<&str> {
        self.if_none_match.as_deref()
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}
