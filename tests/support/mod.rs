//! Shared test utilities.

pub mod runtime;

/// Substitutes the mock server's address for the `SERVER` placeholder used
/// in feature files.
pub fn resolve_server_url(server_url: &str, url: &str) -> String {
    let cleaned_url = url.trim_matches('"');
    if cleaned_url.contains("://SERVER") {
        cleaned_url
            .replace("https://SERVER", server_url)
            .replace("http://SERVER", server_url)
    } else {
        cleaned_url.replace("SERVER", server_url)
    }
}

/// Enterprise-style API base the locator derives for a mock server host.
pub fn api_base(server_url: &str) -> String {
    format!("{server_url}/api/v3")
}
