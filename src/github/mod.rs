//! Typed bindings for GitHub pull requests.
//!
//! Records in [`models`] are decoded from wire JSON; [`client::PullRequests`]
//! turns method calls into requests sent through a [`transport::GitHubTransport`]
//! and decodes the responses. Listings are lazy [`pagination::Pages`] cursors.
//! Errors from every layer are mapped into [`PullsError`] so callers can
//! surface precise failures without seeing Octocrab internals.

pub mod client;
pub mod error;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod transport;

pub use client::{
    ListPullRequests, MergeOptions, NewPullRequest, NewReviewComment, PullRequestSort,
    PullRequestState, PullRequestUpdate, PullRequests, SortDirection, StateChange,
};
pub use error::PullsError;
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator,
    RepositoryName, RepositoryOwner,
};
pub use models::{
    Contents, FromWire, Issue, IssueComment, PullDestination, PullFile, PullRequest, PullReview,
    RepoCommit, ReviewComment, User,
};
pub use pagination::{ListOptions, Pages};
pub use transport::{GitHubTransport, OctocrabTransport};

#[cfg(test)]
mod tests;
