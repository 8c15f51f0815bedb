//! Lazy, page-following sequences over GitHub list endpoints.
//!
//! A [`Pages`] cursor issues no request until the first item is asked for,
//! then walks `Link: <...>; rel="next"` headers until the listing is
//! exhausted or the caller's limit is reached.

use std::collections::{HashSet, VecDeque};
use std::marker::PhantomData;

use futures::Stream;
use futures::stream;
use http::StatusCode;
use serde_json::Value;
use tracing::trace;

use super::error::PullsError;
use super::models::FromWire;
use super::transport::{ApiRequest, GitHubTransport};

/// Largest page size GitHub accepts.
pub const MAX_PER_PAGE: usize = 100;

/// Controls how much of a listing is fetched.
///
/// # Example
///
/// ```
/// use pullwire::github::pagination::ListOptions;
///
/// let options = ListOptions::all().with_limit(5);
/// assert_eq!(options.limit(), Some(5));
/// assert_eq!(options.per_page(), 5);
/// assert_eq!(ListOptions::all().per_page(), 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    limit: Option<usize>,
    etag: Option<String>,
}

impl ListOptions {
    /// Fetches every available item.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Stops after `limit` items; a limit of zero yields nothing.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Makes the first request conditional on an `ETag` from a previous
    /// listing, so an unchanged listing yields no items.
    #[must_use]
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Maximum number of items, `None` meaning all.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// `ETag` sent as `If-None-Match`, if any.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Page size requested from GitHub.
    #[must_use]
    pub fn per_page(&self) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => limit.min(MAX_PER_PAGE),
            _ => MAX_PER_PAGE,
        }
    }
}

/// Lazy cursor over a paginated listing of `R` records.
///
/// Query parameters and the conditional `If-None-Match` header go out with the
/// first request only; later pages are fetched from the `next` links GitHub
/// returns, which already carry them. A `304 Not Modified` ends the sequence.
/// A request or status failure is yielded once as an `Err` item and finishes
/// the cursor; a single malformed record is yielded as an `Err` without
/// stopping the walk.
pub struct Pages<'c, T: ?Sized, R> {
    transport: &'c T,
    operation: &'static str,
    pending: Option<ApiRequest>,
    visited: HashSet<String>,
    buffer: VecDeque<Value>,
    remaining: Option<usize>,
    etag: Option<String>,
    started: bool,
    _record: PhantomData<fn() -> R>,
}

impl<'c, T, R> Pages<'c, T, R>
where
    T: GitHubTransport + ?Sized,
    R: FromWire,
{
    /// Prepares a cursor; nothing is sent until the first item is requested.
    pub(crate) fn new(
        transport: &'c T,
        request: ApiRequest,
        options: ListOptions,
        operation: &'static str,
    ) -> Self {
        let per_page = options.per_page();
        let first = request
            .with_query("per_page", per_page.to_string())
            .with_if_none_match(options.etag);
        Self {
            transport,
            operation,
            pending: Some(first),
            visited: HashSet::new(),
            buffer: VecDeque::new(),
            remaining: options.limit,
            etag: None,
            started: false,
            _record: PhantomData,
        }
    }

    /// `ETag` of the first page, available once it has been fetched.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Returns the next record, fetching another page when needed.
    pub async fn next(&mut self) -> Option<Result<R, PullsError>> {
        loop {
            if self.remaining == Some(0) {
                self.finish();
                return None;
            }

            if let Some(value) = self.buffer.pop_front() {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Some(R::from_wire(value));
            }

            let request = self.pending.take()?;
            if let Err(error) = self.fetch(request).await {
                self.finish();
                return Some(Err(error));
            }
        }
    }

    /// Drains the cursor into a vector, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first request, status, or decode failure encountered.
    pub async fn collect(mut self) -> Result<Vec<R>, PullsError> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            records.push(record?);
        }
        Ok(records)
    }

    /// Converts the cursor into a [`Stream`] of records.
    pub fn into_stream(self) -> impl Stream<Item = Result<R, PullsError>> + 'c
    where
        R: 'c,
    {
        stream::unfold(self, |mut pages| async move {
            pages.next().await.map(|record| (record, pages))
        })
    }

    fn finish(&mut self) {
        self.pending = None;
        self.buffer.clear();
    }

    async fn fetch(&mut self, request: ApiRequest) -> Result<(), PullsError> {
        let url = request.url().to_owned();
        if !self.visited.insert(url.clone()) {
            return Err(PullsError::InvalidPagination {
                message: format!("{} links back to already fetched page {url}", self.operation),
            });
        }

        let accept = request.accept();
        let response = self.transport.send(request).await?;
        if !self.started {
            self.started = true;
            self.etag = response.etag();
        }

        if response.status() == StatusCode::NOT_MODIFIED {
            trace!(operation = self.operation, "listing not modified");
            return Ok(());
        }
        response.error_for_status(self.operation)?;

        match response.json_value(self.operation)? {
            Some(Value::Array(items)) => {
                trace!(operation = self.operation, count = items.len(), %url, "fetched page");
                self.buffer.extend(items);
            }
            Some(Value::Object(object)) => {
                let message = object
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("expected a JSON array, got an object")
                    .to_owned();
                return Err(PullsError::UnexpectedResponse {
                    operation: self.operation.to_owned(),
                    message,
                });
            }
            Some(other) => {
                return Err(PullsError::UnexpectedResponse {
                    operation: self.operation.to_owned(),
                    message: format!("expected a JSON array, got {other}"),
                });
            }
            None => {}
        }

        self.pending = response
            .next_link()
            .map(|next| ApiRequest::get(next).with_optional_accept(accept));
        Ok(())
    }
}
