//! Octocrab implementation of the transport.

use async_trait::async_trait;
use http::Method;
use http_body_util::BodyExt;
use octocrab::Octocrab;
use tracing::debug;
use url::Url;

use crate::github::error::PullsError;
use crate::github::locator::PersonalAccessToken;

use super::client::{BaseClient, connect};
use super::error_mapping::map_octocrab_error;
use super::http_utils::{build_request_headers, build_uri};
use super::{ApiRequest, ApiResponse, GitHubTransport};

/// Octocrab-backed transport.
///
/// Requests go through Octocrab's raw HTTP methods so status codes reach the
/// caller untouched. The `Accept` and `If-None-Match` headers are honoured on
/// `GET` requests, which are the only ones that need them.
pub struct OctocrabTransport {
    client: Octocrab,
    api_base: Url,
}

impl OctocrabTransport {
    /// Wraps an existing Octocrab client configured for `api_base`.
    #[must_use]
    pub const fn new(client: Octocrab, api_base: Url) -> Self {
        Self { client, api_base }
    }

    /// Builds an authenticated transport for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns `PullsError::InvalidUrl` when the base URL cannot be parsed or
    /// `PullsError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &str) -> Result<Self, PullsError> {
        let BaseClient { client, api_base } = connect(token, api_base)?;
        Ok(Self::new(client, api_base))
    }

    /// API base URL the transport resolves relative paths against.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }
}

#[async_trait]
impl GitHubTransport for OctocrabTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, PullsError> {
        let uri = build_uri(&request, &self.api_base)?;
        let operation = format!("{} {}", request.method(), request.url());
        debug!(method = %request.method(), %uri, "sending GitHub API request");

        let method = request.method();
        let result = if *method == Method::GET {
            self.client
                ._get_with_headers(uri, build_request_headers(&request))
                .await
        } else if *method == Method::POST {
            self.client._post(uri, request.body()).await
        } else if *method == Method::PATCH {
            self.client._patch(uri, request.body()).await
        } else if *method == Method::PUT {
            self.client._put(uri, request.body()).await
        } else {
            return Err(PullsError::InvalidArgument {
                argument: format!("unsupported HTTP method {method}"),
            });
        };
        let response = result.map_err(|error| map_octocrab_error(&operation, &error))?;

        let (parts, raw_body) = response.into_parts();
        // Diff and patch bodies need not be UTF-8.
        let body = raw_body
            .collect()
            .await
            .map_err(|error| PullsError::Network {
                message: format!("{operation} response read failed: {error}"),
            })?
            .to_bytes()
            .to_vec();
        let status = parts.status;
        let headers = parts.headers;

        debug!(%status, bytes = body.len(), "received GitHub API response");
        Ok(ApiResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::OctocrabTransport;
    use crate::github::locator::PersonalAccessToken;
    use crate::github::transport::{ApiRequest, GitHubTransport, MediaType};

    fn transport_for(server: &MockServer) -> OctocrabTransport {
        let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
        OctocrabTransport::for_token(&token, &format!("{}/api/v3", server.uri()))
            .expect("should create transport")
    }

    #[tokio::test]
    async fn absolute_urls_under_the_base_are_routed_through_it() {
        let server = MockServer::start().await;
        let transport = transport_for(&server);

        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/pulls/7/files"))
            .and(query_param("per_page", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let url = format!("{}/api/v3/repos/owner/repo/pulls/7/files", server.uri());
        let response = transport
            .send(ApiRequest::get(url).with_query("per_page", "5"))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), b"[]");
    }

    #[tokio::test]
    async fn error_statuses_are_returned_untouched() {
        let server = MockServer::start().await;
        let transport = transport_for(&server);

        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/pulls/7/merge"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;

        let response = transport
            .send(ApiRequest::get("/repos/owner/repo/pulls/7/merge"))
            .await
            .expect("transport should not interpret statuses");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_requests_send_conditional_headers() {
        let server = MockServer::start().await;
        let transport = transport_for(&server);

        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/pulls/7/reviews"))
            .and(header("if-none-match", "\"etag-1\""))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        let response = transport
            .send(
                ApiRequest::get("/repos/owner/repo/pulls/7/reviews")
                    .with_accept(MediaType::ReviewsPreview)
                    .with_if_none_match(Some("\"etag-1\"".to_owned())),
            )
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn put_requests_carry_json_bodies() {
        let server = MockServer::start().await;
        let transport = transport_for(&server);

        Mock::given(method("PUT"))
            .and(path("/api/v3/repos/owner/repo/pulls/7/merge"))
            .and(body_json(json!({ "squash": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "merged": true })))
            .mount(&server)
            .await;

        let response = transport
            .send(ApiRequest::put(
                "/repos/owner/repo/pulls/7/merge",
                json!({ "squash": true }),
            ))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bodies_are_returned_as_raw_bytes() {
        let server = MockServer::start().await;
        let transport = transport_for(&server);
        let latin1_diff = b"diff --git a/x b/x\n+caf\xe9\n".to_vec();

        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/pulls/7"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(latin1_diff.clone()))
            .mount(&server)
            .await;

        let response = transport
            .send(ApiRequest::get("/repos/owner/repo/pulls/7").with_accept(MediaType::Diff))
            .await
            .expect("non-UTF-8 bodies should be read");

        assert_eq!(response.body(), latin1_diff.as_slice());
    }
}
