//! Shared HTTP utilities for the transport implementations.

use http::Uri;
use http::header::{HeaderMap, HeaderValue, ACCEPT, IF_NONE_MATCH};
use url::{Url, form_urlencoded};

use crate::github::error::PullsError;

use super::request::ApiRequest;

pub(super) fn header_to_string(header_value: Option<&HeaderValue>) -> Option<String> {
    header_value
        .and_then(|raw| raw.to_str().ok())
        .map(ToOwned::to_owned)
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header.
pub(super) fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let trimmed = param.trim();
            trimmed == "rel=\"next\"" || trimmed == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .map(ToOwned::to_owned)
    })
}

/// Rewrites URLs that live under `base` into base-relative paths.
///
/// Wire records carry absolute API URLs. Octocrab applies its base URI and
/// credentials to relative paths, so anything under the configured API base
/// is sent as a path; foreign URLs stay absolute.
pub(super) fn relative_to_base(target: &str, base: &Url) -> String {
    if target.starts_with('/') {
        return target.to_owned();
    }
    let Ok(parsed) = Url::parse(target) else {
        return target.to_owned();
    };

    let same_origin = parsed.scheme() == base.scheme()
        && parsed.host_str() == base.host_str()
        && parsed.port_or_known_default() == base.port_or_known_default();
    if !same_origin {
        return target.to_owned();
    }

    let base_path = base.path().trim_end_matches('/');
    let Some(remainder) = parsed.path().strip_prefix(base_path) else {
        return target.to_owned();
    };
    if !remainder.is_empty() && !remainder.starts_with('/') {
        return target.to_owned();
    }

    let path = if remainder.is_empty() { "/" } else { remainder };
    parsed
        .query()
        .map_or_else(|| path.to_owned(), |query| format!("{path}?{query}"))
}

/// Builds the request URI, appending query parameters to any existing ones.
pub(super) fn build_uri(request: &ApiRequest, base: &Url) -> Result<Uri, PullsError> {
    let target = relative_to_base(request.url(), base);
    let with_query = if request.query().is_empty() {
        target
    } else {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(request.query())
            .finish();
        let separator = if target.contains('?') { '&' } else { '?' };
        format!("{target}{separator}{encoded}")
    };

    with_query
        .parse::<Uri>()
        .map_err(|error| PullsError::InvalidUrl(format!("{with_query}: {error}")))
}

/// Builds the optional headers for a `GET` request.
pub(super) fn build_request_headers(request: &ApiRequest) -> Option<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(media_type) = request.accept() {
        headers.insert(ACCEPT, HeaderValue::from_static(media_type.as_str()));
    }

    if let Some(etag) = request.if_none_match()
        && let Ok(value) = etag.parse()
    {
        headers.insert(IF_NONE_MATCH, value);
    }

    if headers.is_empty() {
        None
    } else {
        Some(headers)
    }
}

#[cfg(test)]
mod tests {
    use http::header::{ACCEPT, IF_NONE_MATCH};
    use rstest::rstest;
    use url::Url;

    use super::{build_request_headers, build_uri, parse_next_link, relative_to_base};
    use crate::github::transport::{ApiRequest, MediaType};

    #[rstest]
    #[case::public_api(
        "https://api.github.com",
        "https://api.github.com/repos/o/r/pulls/1",
        "/repos/o/r/pulls/1"
    )]
    #[case::enterprise_prefix(
        "https://ghe.example.com/api/v3",
        "https://ghe.example.com/api/v3/repos/o/r/pulls/1/files?page=2",
        "/repos/o/r/pulls/1/files?page=2"
    )]
    #[case::already_relative("https://api.github.com", "/repos/o/r", "/repos/o/r")]
    #[case::foreign_host(
        "https://api.github.com",
        "https://raw.example.com/file",
        "https://raw.example.com/file"
    )]
    #[case::outside_prefix(
        "https://ghe.example.com/api/v3",
        "https://ghe.example.com/o/r/pull/1",
        "https://ghe.example.com/o/r/pull/1"
    )]
    #[case::prefix_lookalike(
        "https://ghe.example.com/api/v3",
        "https://ghe.example.com/api/v30/x",
        "https://ghe.example.com/api/v30/x"
    )]
    fn rewrites_urls_under_the_api_base(
        #[case] base: &str,
        #[case] target: &str,
        #[case] expected: &str,
    ) {
        let base_url = Url::parse(base).expect("base should parse");
        assert_eq!(relative_to_base(target, &base_url), expected);
    }

    #[rstest]
    fn build_uri_appends_query_to_existing_parameters() {
        let base = Url::parse("https://api.github.com").expect("base should parse");
        let request = ApiRequest::get("https://api.github.com/repos/o/r/pulls?state=all")
            .with_query("per_page", "100");

        let uri = build_uri(&request, &base).expect("uri should build");

        assert_eq!(uri.to_string(), "/repos/o/r/pulls?state=all&per_page=100");
    }

    #[rstest]
    #[case::next_first(
        "<https://x/p?page=2>; rel=\"next\", <https://x/p?page=9>; rel=\"last\"",
        Some("https://x/p?page=2")
    )]
    #[case::next_last(
        "<https://x/p?page=1>; rel=\"prev\", <https://x/p?page=3>; rel=\"next\"",
        Some("https://x/p?page=3")
    )]
    #[case::no_next("<https://x/p?page=1>; rel=\"first\"", None)]
    #[case::garbage("not a link header", None)]
    fn parses_next_link(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_next_link(header).as_deref(), expected);
    }

    #[rstest]
    fn request_headers_include_accept_and_validator() {
        let request = ApiRequest::get("/x")
            .with_accept(MediaType::Patch)
            .with_if_none_match(Some("\"v1\"".to_owned()));

        let headers = build_request_headers(&request).expect("headers should be present");

        assert_eq!(
            headers.get(ACCEPT).and_then(|value| value.to_str().ok()),
            Some("application/vnd.github.patch")
        );
        assert_eq!(
            headers.get(IF_NONE_MATCH).and_then(|value| value.to_str().ok()),
            Some("\"v1\"")
        );
    }

    #[rstest]
    fn plain_request_has_no_headers() {
        assert!(build_request_headers(&ApiRequest::get("/x")).is_none());
    }
}
