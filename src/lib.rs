//! Pullwire: typed GitHub pull request bindings.
//!
//! The library decodes pull requests, changed files, reviews, and review
//! comments from GitHub's REST API and wraps the follow-on calls (update,
//! merge, diff, comment, reply, paginated listings) as typed operations over
//! an injectable HTTP transport backed by Octocrab.

#![recursion_limit = "256"]

pub mod config;
pub mod github;
pub mod telemetry;

pub use config::PullwireConfig;
pub use github::{
    ListOptions, OctocrabTransport, PersonalAccessToken, PullRequest, PullRequestLocator,
    PullRequests, PullsError,
};
