//! Command-line configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults
//! 2. **Configuration file** – `.pullwire.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PULLWIRE_PR_URL`, `PULLWIRE_TOKEN`, or
//!    legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--pr-url`/`-u`, `--token`/`-t`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! pr_url = "https://github.com/owner/repo/pull/123"
//! token = "ghp_example"
//! action = "files"
//! limit = 20
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::client::MergeOptions;
use crate::github::error::PullsError;
use crate::github::pagination::ListOptions;

/// What the command-line tool does with the configured pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Print the pull request's headline fields.
    #[default]
    Summary,
    /// List changed files.
    Files,
    /// List commits.
    Commits,
    /// List submitted reviews.
    Reviews,
    /// List review comments on the diff.
    ReviewComments,
    /// List discussion comments.
    IssueComments,
    /// Print the unified diff.
    Diff,
    /// Print the patch series.
    Patch,
    /// Merge the pull request.
    Merge,
    /// Close the pull request.
    Close,
    /// Reopen the pull request.
    Reopen,
}

impl Action {
    /// Every action in display order.
    pub const ALL: [Self; 11] = [
        Self::Summary,
        Self::Files,
        Self::Commits,
        Self::Reviews,
        Self::ReviewComments,
        Self::IssueComments,
        Self::Diff,
        Self::Patch,
        Self::Merge,
        Self::Close,
        Self::Reopen,
    ];

    /// Returns the configuration value naming this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Files => "files",
            Self::Commits => "commits",
            Self::Reviews => "reviews",
            Self::ReviewComments => "review-comments",
            Self::IssueComments => "issue-comments",
            Self::Diff => "diff",
            Self::Patch => "patch",
            Self::Merge => "merge",
            Self::Close => "close",
            Self::Reopen => "reopen",
        }
    }

    /// Returns true when the action changes the pull request.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::Merge | Self::Close | Self::Reopen)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PullsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == normalised)
            .ok_or_else(|| PullsError::Configuration {
                message: format!(
                    "unknown action '{value}' (expected one of: {})",
                    Self::ALL.map(|action| action.as_str()).join(", ")
                ),
            })
    }
}

/// Tool configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PULLWIRE_PR_URL` or `--pr-url`: Pull request URL
/// - `PULLWIRE_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `PULLWIRE_ACTION` or `--action`: What to do with the pull request
/// - `PULLWIRE_LIMIT` or `--limit`: Maximum items listed
/// - `PULLWIRE_MERGE_MESSAGE` or `--merge-message`: Merge commit detail
///
/// # Example
///
/// ```no_run
/// use pullwire::PullwireConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = PullwireConfig::load().expect("failed to load configuration");
/// let pr_url = config.require_pr_url().expect("PR URL required");
/// let action = config.action().expect("action should be valid");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PULLWIRE",
    discovery(
        dotfile_name = ".pullwire.toml",
        config_file_name = "pullwire.toml",
        app_name = "pullwire"
    )
)]
pub struct PullwireConfig {
    /// GitHub pull request URL to operate on.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-url <URL>` or `-u <URL>`
    /// - Environment: `PULLWIRE_PR_URL`
    /// - Config file: `pr_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PULLWIRE_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Action to perform, defaulting to `summary`.
    ///
    /// One of `summary`, `files`, `commits`, `reviews`, `review-comments`,
    /// `issue-comments`, `diff`, `patch`, `merge`, `close`, or `reopen`.
    #[ortho_config(cli_short = 'a')]
    pub action: Option<String>,

    /// Maximum number of items printed by listing actions.
    #[ortho_config(cli_short = 'l')]
    pub limit: Option<usize>,

    /// Extra detail for the merge commit message.
    #[ortho_config()]
    pub merge_message: Option<String>,

    /// Squashes commits when merging.
    ///
    /// Note: Environment variable `PULLWIRE_SQUASH` is not supported because
    /// `ortho_config` does not load boolean values from the environment.
    #[ortho_config()]
    pub squash: bool,
}

impl PullwireConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`PullsError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, PullsError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(PullsError::MissingToken)
    }

    /// Returns the pull request URL or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`PullsError::MissingPullRequestUrl`] when no URL is configured.
    pub fn require_pr_url(&self) -> Result<&str, PullsError> {
        self.pr_url
            .as_deref()
            .ok_or(PullsError::MissingPullRequestUrl)
    }

    /// Parses the configured action, defaulting to [`Action::Summary`].
    ///
    /// # Errors
    ///
    /// Returns [`PullsError::Configuration`] for an unknown action name.
    pub fn action(&self) -> Result<Action, PullsError> {
        self.action
            .as_deref()
            .map_or(Ok(Action::Summary), Action::from_str)
    }

    /// Listing options derived from `limit`.
    #[must_use]
    pub fn list_options(&self) -> ListOptions {
        self.limit
            .map_or_else(ListOptions::all, |limit| ListOptions::all().with_limit(limit))
    }

    /// Merge options derived from `merge_message` and `squash`.
    #[must_use]
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            commit_message: self.merge_message.clone(),
            sha: None,
            squash: self.squash,
        }
    }
}

#[cfg(test)]
mod tests;
