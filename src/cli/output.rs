//! Output formatting for command-line actions.

use std::io::{self, Write};

use pullwire::PullsError;
use pullwire::github::{IssueComment, PullFile, PullRequest, PullReview, RepoCommit, ReviewComment};

fn io_error(error: &io::Error) -> PullsError {
    PullsError::Io {
        message: error.to_string(),
    }
}

fn login(user: Option<&pullwire::github::User>) -> &str {
    user.map_or("unknown", |account| account.login.as_str())
}

/// Writes the headline fields of a pull request.
pub fn write_summary<W: Write>(writer: &mut W, pull: &PullRequest) -> Result<(), PullsError> {
    let head = pull
        .head
        .as_ref()
        .map_or_else(|| "unknown".to_owned(), |destination| destination.label.clone());
    let base = pull
        .base
        .as_ref()
        .map_or_else(|| "unknown".to_owned(), |destination| destination.label.clone());
    let url = pull.html_url.as_deref().unwrap_or("no HTML URL provided");

    writeln!(
        writer,
        "{pull} {} by {} [{}]",
        pull.title,
        login(pull.user.as_ref()),
        pull.state
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer, "{head} -> {base}").map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "+{} -{} in {} commits, {} comments",
        pull.additions_count.unwrap_or_default(),
        pull.deletions_count.unwrap_or_default(),
        pull.commits_count.unwrap_or_default(),
        pull.comments_count.unwrap_or_default()
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer, "URL: {url}").map_err(|e| io_error(&e))
}

/// Writes one line per changed file.
pub fn write_files<W: Write>(writer: &mut W, files: &[PullFile]) -> Result<(), PullsError> {
    for file in files {
        writeln!(
            writer,
            "{:<9} +{:<5} -{:<5} {}",
            file.status, file.additions_count, file.deletions_count, file.filename
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes one line per commit.
pub fn write_commits<W: Write>(writer: &mut W, commits: &[RepoCommit]) -> Result<(), PullsError> {
    for commit in commits {
        let short: String = commit.sha.chars().take(7).collect();
        let author = commit
            .author
            .as_ref()
            .map(|user| user.login.as_str())
            .or(commit.author_name.as_deref())
            .unwrap_or("unknown");
        writeln!(writer, "{short} {} ({author})", commit.summary()).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes one line per review.
pub fn write_reviews<W: Write>(writer: &mut W, reviews: &[PullReview]) -> Result<(), PullsError> {
    for review in reviews {
        writeln!(
            writer,
            "{review} {} by {}",
            review.state,
            login(review.user.as_ref())
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes review comments with their diff anchors.
pub fn write_review_comments<W: Write>(
    writer: &mut W,
    comments: &[ReviewComment],
) -> Result<(), PullsError> {
    for comment in comments {
        let path = comment.path.as_deref().unwrap_or("(no path)");
        let position = comment
            .position
            .map_or_else(|| "outdated".to_owned(), |line| line.to_string());
        writeln!(
            writer,
            "{path}:{position} @{}: {}",
            login(comment.user.as_ref()),
            comment.body.as_deref().unwrap_or_default()
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes discussion comments.
pub fn write_issue_comments<W: Write>(
    writer: &mut W,
    comments: &[IssueComment],
) -> Result<(), PullsError> {
    for comment in comments {
        writeln!(
            writer,
            "@{}: {}",
            login(comment.user.as_ref()),
            comment.body.as_deref().unwrap_or_default()
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes raw diff or patch bytes.
pub fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), PullsError> {
    writer.write_all(bytes).map_err(|e| io_error(&e))
}

/// Reports the outcome of a mutating action.
pub fn write_outcome<W: Write>(
    writer: &mut W,
    pull: &PullRequest,
    verb: &str,
    succeeded: bool,
) -> Result<(), PullsError> {
    let outcome = if succeeded { verb } else { "unchanged" };
    writeln!(writer, "{pull}: {outcome}").map_err(|e| io_error(&e))
}
