//! Error types exposed by the pull request bindings.

use thiserror::Error;

/// Errors surfaced while parsing input, talking to GitHub, or decoding
/// responses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PullsError {
    /// The CLI did not include a pull request URL.
    #[error("pull request URL is required")]
    MissingPullRequestUrl,

    /// An operation was called with input it cannot act on.
    #[error("invalid argument: {argument}")]
    InvalidArgument {
        /// What was wrong with the input.
        argument: String,
    },

    /// The provided URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The pull request path is incomplete.
    #[error("pull request URL must match /owner/repo/pull/<number>")]
    MissingPathSegments,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// The addressed resource does not exist or is not visible.
    #[error("GitHub resource not found: {message}")]
    NotFound {
        /// GitHub error message returned with the 404 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response body did not match the expected wire format.
    #[error("failed to decode {resource}: {message}")]
    Decode {
        /// The record being decoded (e.g. `pull request`).
        resource: &'static str,
        /// Deserialiser error detail.
        message: String,
    },

    /// The response had a shape the operation cannot process, such as an
    /// object where a list was expected.
    #[error("unexpected response from {operation}: {message}")]
    UnexpectedResponse {
        /// Operation that received the response.
        operation: String,
        /// Description of the mismatch.
        message: String,
    },

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
