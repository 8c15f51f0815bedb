//! Error mapping helpers for the Octocrab transport and raw responses.

use http::StatusCode;

use crate::github::error::PullsError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> PullsError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, Some(source.message.clone()));
    }

    if is_network_error(error) {
        return PullsError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    PullsError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps an error status and optional GitHub message to a [`PullsError`].
pub(crate) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> PullsError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        PullsError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else if status == StatusCode::NOT_FOUND {
        PullsError::NotFound {
            message: format!("{operation} failed: {message}"),
        }
    } else {
        PullsError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::map_http_error;
    use crate::github::error::PullsError;

    #[rstest]
    fn missing_message_falls_back_to_placeholder() {
        let error = map_http_error("merge", StatusCode::CONFLICT, None);

        assert_eq!(
            error,
            PullsError::Api {
                message: "merge failed with status 409 Conflict: unknown error".to_owned()
            }
        );
    }

    #[rstest]
    fn forbidden_is_reported_as_authentication() {
        let error = map_http_error(
            "update pull request",
            StatusCode::FORBIDDEN,
            Some("Resource not accessible by integration".to_owned()),
        );

        assert!(
            matches!(error, PullsError::Authentication { ref message } if message.contains("not accessible")),
            "unexpected error: {error:?}"
        );
    }
}
