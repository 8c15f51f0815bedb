//! Command-line action handlers.
//!
//! [`run`] resolves the configured pull request, builds an Octocrab-backed
//! transport, and dispatches the configured [`Action`]. Output formatting
//! lives in [`output`].

use std::io::{self, Write};

use pullwire::config::Action;
use pullwire::github::{GitHubTransport, PullRequestLocator, PullRequests};
use pullwire::{OctocrabTransport, PersonalAccessToken, PullsError, PullwireConfig};
use tracing::{debug, info};

pub mod output;

/// Runs the configured action against the configured pull request.
///
/// # Errors
///
/// Returns [`PullsError::MissingPullRequestUrl`] or
/// [`PullsError::MissingToken`] when required configuration is missing, and
/// any error raised by the GitHub request.
pub async fn run(config: &PullwireConfig) -> Result<(), PullsError> {
    let action = config.action()?;
    let locator = PullRequestLocator::parse(config.require_pr_url()?)?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let transport = OctocrabTransport::for_token(&token, locator.api_base().as_str())?;

    let mut stdout = io::stdout().lock();
    execute(&transport, &locator, config, action, &mut stdout).await
}

/// Executes `action` through `transport`, writing results to `writer`.
///
/// # Errors
///
/// Returns any error raised while fetching, mutating, or writing.
pub async fn execute<T, W>(
    transport: &T,
    locator: &PullRequestLocator,
    config: &PullwireConfig,
    action: Action,
    writer: &mut W,
) -> Result<(), PullsError>
where
    T: GitHubTransport + ?Sized,
    W: Write,
{
    let pulls = PullRequests::new(transport);
    let mut pull = pulls.get(locator).await?;
    let options = config.list_options();
    if action.is_mutating() {
        info!(%action, number = pull.number, state = %pull.state, "changing pull request");
    } else {
        debug!(%action, number = pull.number, "reading pull request");
    }

    match action {
        Action::Summary => output::write_summary(writer, &pull),
        Action::Files => {
            let files = pulls.files(&pull, options).collect().await?;
            output::write_files(writer, &files)
        }
        Action::Commits => {
            let commits = pulls.commits(&pull, options).collect().await?;
            output::write_commits(writer, &commits)
        }
        Action::Reviews => {
            let reviews = pulls.reviews(&pull, options).collect().await?;
            output::write_reviews(writer, &reviews)
        }
        Action::ReviewComments => {
            let comments = pulls.review_comments(&pull, options).collect().await?;
            output::write_review_comments(writer, &comments)
        }
        Action::IssueComments => {
            let comments = pulls.issue_comments(&pull, options).collect().await?;
            output::write_issue_comments(writer, &comments)
        }
        Action::Diff => output::write_bytes(writer, &pulls.diff(&pull).await?),
        Action::Patch => output::write_bytes(writer, &pulls.patch(&pull).await?),
        Action::Merge => {
            let merged = pulls.merge(&pull, &config.merge_options()).await?;
            output::write_outcome(writer, &pull, "merged", merged)
        }
        Action::Close => {
            let closed = pulls.close(&mut pull).await?;
            output::write_outcome(writer, &pull, "closed", closed)
        }
        Action::Reopen => {
            let reopened = pulls.reopen(&mut pull).await?;
            output::write_outcome(writer, &pull, "reopened", reopened)
        }
    }
}

#[cfg(test)]
mod tests;
