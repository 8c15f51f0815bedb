//! Wire JSON builders for tests.
//!
//! These produce payloads shaped like GitHub's pulls API so tests can
//! exercise decoding and client operations without hand-writing fixtures.
//! Builders ending in `_at` take the API base URL, which lets wiremock-backed
//! tests point follow-on URLs at a mock server.
//!
//! # Examples
//!
//! ```
//! use pullwire::github::models::test_support::pull_request_json;
//! use pullwire::github::models::{FromWire, PullRequest};
//!
//! let pull = PullRequest::from_wire(pull_request_json("octo", "widgets", 7))
//!     .expect("fixture should decode");
//! assert_eq!(pull.number, 7);
//! ```

use serde_json::{Value, json};

const PUBLIC_API: &str = "https://api.github.com";

/// Builds a user object.
#[must_use]
pub fn user_json(login: &str, id: u64) -> Value {
    json!({
        "login": login,
        "id": id,
        "html_url": format!("https://github.com/{login}"),
        "avatar_url": format!("https://avatars.githubusercontent.com/u/{id}"),
        "url": format!("{PUBLIC_API}/users/{login}"),
        "type": "User"
    })
}

/// Builds a pull request rooted at the public API.
#[must_use]
pub fn pull_request_json(owner: &str, repo: &str, number: u64) -> Value {
    pull_request_json_at(PUBLIC_API, owner, repo, number)
}

/// Builds a pull request whose URLs live under `api_base`.
///
/// # Examples
///
/// ```
/// use pullwire::github::models::test_support::pull_request_json_at;
///
/// let wire = pull_request_json_at("http://127.0.0.1:9/api/v3", "o", "r", 3);
/// assert_eq!(wire["url"], "http://127.0.0.1:9/api/v3/repos/o/r/pulls/3");
/// ```
#[must_use]
pub fn pull_request_json_at(api_base: &str, owner: &str, repo: &str, number: u64) -> Value {
    let repo_url = format!("{api_base}/repos/{owner}/{repo}");
    let url = format!("{repo_url}/pulls/{number}");
    let issue_url = format!("{repo_url}/issues/{number}");
    let html_url = format!("https://github.com/{owner}/{repo}/pull/{number}");
    let repository = json!({
        "id": 1,
        "name": repo,
        "full_name": format!("{owner}/{repo}"),
        "owner": user_json(owner, 2),
        "html_url": format!("https://github.com/{owner}/{repo}"),
        "url": repo_url,
        "default_branch": "main"
    });

    json!({
        "url": url,
        "id": 1000 + number,
        "number": number,
        "title": format!("Pull request {number}"),
        "body": "Adds widgets.",
        "state": "open",
        "draft": false,
        "locked": false,
        "user": user_json("alice", 3),
        "assignee": null,
        "assignees": [],
        "requested_reviewers": [user_json("bob", 4)],
        "merged": false,
        "mergeable": true,
        "mergeable_state": "clean",
        "merged_by": null,
        "additions": 10,
        "deletions": 2,
        "comments": 1,
        "review_comments": 1,
        "commits": 2,
        "created_at": "2024-01-15T10:00:00Z",
        "updated_at": "2024-01-16T10:00:00Z",
        "closed_at": null,
        "merged_at": null,
        "html_url": html_url,
        "diff_url": format!("{html_url}.diff"),
        "patch_url": format!("{html_url}.patch"),
        "issue_url": issue_url,
        "comments_url": format!("{issue_url}/comments"),
        "commits_url": format!("{url}/commits"),
        "review_comments_url": format!("{url}/comments"),
        "review_comment_url": format!("{repo_url}/pulls/comments{{/number}}"),
        "statuses_url": format!("{repo_url}/statuses/abc123"),
        "base": {
            "ref": "main",
            "label": format!("{owner}:main"),
            "sha": "def456",
            "user": user_json(owner, 2),
            "repo": repository.clone()
        },
        "head": {
            "ref": "feature",
            "label": format!("{owner}:feature"),
            "sha": "abc123",
            "user": user_json(owner, 2),
            "repo": repository
        },
        "_links": {
            "self": { "href": url },
            "html": { "href": html_url },
            "issue": { "href": issue_url },
            "comments": { "href": format!("{issue_url}/comments") },
            "review_comments": { "href": format!("{url}/comments") },
            "commits": { "href": format!("{url}/commits") }
        }
    })
}

/// Builds a changed file entry.
#[must_use]
pub fn pull_file_json(filename: &str) -> Value {
    pull_file_json_at(PUBLIC_API, filename)
}

/// Builds a changed file entry whose contents URL lives under `api_base`.
#[must_use]
pub fn pull_file_json_at(api_base: &str, filename: &str) -> Value {
    json!({
        "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
        "filename": filename,
        "status": "modified",
        "additions": 3,
        "deletions": 1,
        "changes": 4,
        "blob_url": format!("https://github.com/octo/widgets/blob/abc123/{filename}"),
        "raw_url": format!("https://github.com/octo/widgets/raw/abc123/{filename}"),
        "contents_url": format!("{api_base}/repos/octo/widgets/contents/{filename}?ref=abc123"),
        "patch": "@@ -1,2 +1,4 @@\n+use std::fmt;\n"
    })
}

/// Builds a review comment on `owner/repo#number`.
#[must_use]
pub fn review_comment_json(id: u64, owner: &str, repo: &str, number: u64) -> Value {
    review_comment_json_at(PUBLIC_API, id, owner, repo, number)
}

/// Builds a review comment whose URLs live under `api_base`.
#[must_use]
pub fn review_comment_json_at(
    api_base: &str,
    id: u64,
    owner: &str,
    repo: &str,
    number: u64,
) -> Value {
    let repo_url = format!("{api_base}/repos/{owner}/{repo}");
    json!({
        "id": id,
        "url": format!("{repo_url}/pulls/comments/{id}"),
        "body": format!("Comment {id}"),
        "created_at": "2024-01-15T11:00:00Z",
        "updated_at": "2024-01-15T11:00:00Z",
        "html_url": format!("https://github.com/{owner}/{repo}/pull/{number}#discussion_r{id}"),
        "user": user_json("bob", 4),
        "path": "src/lib.rs",
        "position": 4,
        "original_position": 4,
        "commit_id": "abc123",
        "original_commit_id": "abc123",
        "diff_hunk": "@@ -1,2 +1,4 @@",
        "pull_request_url": format!("{repo_url}/pulls/{number}"),
        "in_reply_to_id": null,
        "_links": {
            "self": { "href": format!("{repo_url}/pulls/comments/{id}") },
            "pull_request": { "href": format!("{repo_url}/pulls/{number}") }
        }
    })
}

/// Builds a submitted review.
#[must_use]
pub fn review_json(id: u64, state: &str) -> Value {
    json!({
        "id": id,
        "commit_id": "abc123",
        "user": user_json("bob", 4),
        "state": state,
        "body": "Looks good",
        "submitted_at": "2024-01-16T09:00:00Z",
        "pull_request_url": format!("{PUBLIC_API}/repos/octo/widgets/pulls/42"),
        "html_url": format!("https://github.com/octo/widgets/pull/42#pullrequestreview-{id}")
    })
}

/// Builds an issue comment.
#[must_use]
pub fn issue_comment_json(id: u64, body: &str) -> Value {
    json!({
        "id": id,
        "url": format!("{PUBLIC_API}/repos/octo/widgets/issues/comments/{id}"),
        "html_url": format!("https://github.com/octo/widgets/pull/42#issuecomment-{id}"),
        "body": body,
        "user": user_json("alice", 3),
        "created_at": "2024-01-15T12:00:00Z",
        "updated_at": "2024-01-15T12:00:00Z"
    })
}

/// Builds a commit entry.
#[must_use]
pub fn commit_json(sha: &str, message: &str) -> Value {
    json!({
        "sha": sha,
        "url": format!("{PUBLIC_API}/repos/octo/widgets/commits/{sha}"),
        "html_url": format!("https://github.com/octo/widgets/commit/{sha}"),
        "commit": {
            "message": message,
            "author": { "name": "Alice" },
            "committer": { "name": "Alice" }
        },
        "author": user_json("alice", 3),
        "committer": user_json("alice", 3)
    })
}

/// Builds the issue backing `owner/repo#number`.
#[must_use]
pub fn issue_json(owner: &str, repo: &str, number: u64) -> Value {
    json!({
        "id": 2000 + number,
        "number": number,
        "title": format!("Pull request {number}"),
        "body": "Adds widgets.",
        "state": "open",
        "url": format!("{PUBLIC_API}/repos/{owner}/{repo}/issues/{number}"),
        "html_url": format!("https://github.com/{owner}/{repo}/pull/{number}"),
        "user": user_json("alice", 3),
        "labels": [{ "name": "enhancement" }],
        "comments": 1
    })
}

/// Builds a base64-encoded file from the contents API.
#[must_use]
pub fn contents_json(path: &str, encoded: &str) -> Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({
        "name": name,
        "path": path,
        "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
        "size": 11,
        "type": "file",
        "encoding": "base64",
        "content": encoded,
        "url": format!("{PUBLIC_API}/repos/octo/widgets/contents/{path}"),
        "html_url": format!("https://github.com/octo/widgets/blob/main/{path}"),
        "download_url": format!("https://raw.githubusercontent.com/octo/widgets/main/{path}")
    })
}
