//! Behavioural tests for pull request operations against a mock GitHub API.

mod support;

use pullwire::github::models::test_support::{pull_file_json_at, pull_request_json_at};
use pullwire::github::{MergeOptions, PullFile};
use pullwire::{
    ListOptions, OctocrabTransport, PersonalAccessToken, PullRequest, PullRequestLocator,
    PullRequests, PullsError,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};
use support::runtime::{SharedRuntime, ensure_runtime_and_server};
use support::{api_base, resolve_server_url};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "octo";
const REPO: &str = "widgets";

#[derive(ScenarioState, Default)]
struct PullState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    token: Slot<String>,
    locator: Slot<PullRequestLocator>,
    pull: Slot<PullRequest>,
    files: Slot<Vec<PullFile>>,
    diff: Slot<Vec<u8>>,
    merged: Slot<bool>,
    error: Slot<PullsError>,
}

#[fixture]
fn pull_state() -> PullState {
    PullState::default()
}

fn failure(message: impl Into<String>) -> PullsError {
    PullsError::Api {
        message: message.into(),
    }
}

fn runtime(pull_state: &PullState) -> Result<SharedRuntime, PullsError> {
    ensure_runtime_and_server(&pull_state.runtime, &pull_state.server).map_err(|error| {
        PullsError::Io {
            message: format!("failed to start test runtime: {error}"),
        }
    })
}

fn server_url(pull_state: &PullState) -> Result<String, PullsError> {
    pull_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| failure("mock server not initialised"))
}

fn mount(pull_state: &PullState, mocks: Vec<Mock>) -> Result<(), PullsError> {
    let shared_runtime = runtime(pull_state)?;
    pull_state
        .server
        .with_ref(|server| {
            for mock in mocks {
                shared_runtime.block_on(mock.mount(server));
            }
        })
        .ok_or_else(|| failure("mock server not initialised"))
}

fn pull_path(pr: u64) -> String {
    format!("/api/v3/repos/{OWNER}/{REPO}/pulls/{pr}")
}

fn pull_mock(server_url: &str, pr: u64) -> Mock {
    let body = pull_request_json_at(&api_base(server_url), OWNER, REPO, pr);
    Mock::given(method("GET"))
        .and(path(pull_path(pr)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

fn file_page(server_url: &str, first: u64, count: u64) -> Value {
    let base = api_base(server_url);
    Value::Array(
        (first..first + count)
            .map(|index| pull_file_json_at(&base, &format!("src/file_{index}.rs")))
            .collect(),
    )
}

/// Runs an operation against the loaded pull request.
fn with_pull<F, Fut, R>(pull_state: &PullState, operation: F) -> Result<R, PullsError>
where
    F: FnOnce(OctocrabTransport, PullRequest) -> Fut,
    Fut: std::future::Future<Output = Result<R, PullsError>>,
{
    let pull = pull_state
        .pull
        .get()
        .ok_or_else(|| failure("no pull request loaded"))?;
    let transport = transport(pull_state)?;
    runtime(pull_state)?.block_on(operation(transport, pull))
}

fn transport(pull_state: &PullState) -> Result<OctocrabTransport, PullsError> {
    let token_value = pull_state.token.get().ok_or(PullsError::MissingToken)?;
    let token = PersonalAccessToken::new(token_value)?;
    let locator = pull_state
        .locator
        .get()
        .ok_or_else(|| failure("no pull request URL given"))?;
    // Octocrab spawns its service worker on construction, so build the
    // client inside the shared runtime.
    runtime(pull_state)?
        .block_on(async { OctocrabTransport::for_token(&token, locator.api_base().as_str()) })
}

#[given("a mock GitHub API server with pull request {pr:u64} changing {count:u64} files")]
fn seed_pull_with_files(pull_state: &PullState, pr: u64, count: u64) -> Result<(), PullsError> {
    runtime(pull_state)?;
    let server_url = server_url(pull_state)?;
    let files = Mock::given(method("GET"))
        .and(path(format!("{}/files", pull_path(pr))))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_page(&server_url, 1, count)));
    mount(pull_state, vec![pull_mock(&server_url, pr), files])
}

#[given(
    "a mock GitHub API server paging pull request {pr:u64} files {per_page:u64} at a time \
     across {pages:u64} pages"
)]
fn seed_paged_files(
    pull_state: &PullState,
    pr: u64,
    per_page: u64,
    pages: u64,
) -> Result<(), PullsError> {
    runtime(pull_state)?;
    let server_url = server_url(pull_state)?;
    let files_path = format!("{}/files", pull_path(pr));
    let mut mocks = vec![pull_mock(&server_url, pr)];

    for page in 1..=pages {
        let first = (page - 1) * per_page + 1;
        let mut response =
            ResponseTemplate::new(200).set_body_json(file_page(&server_url, first, per_page));
        if page < pages {
            let next = format!("{server_url}{files_path}?page={}", page + 1);
            response = response.insert_header("Link", format!("<{next}>; rel=\"next\""));
        }
        // The first request carries the client's page size; later ones follow
        // the server's links verbatim.
        let mock = if page == 1 {
            Mock::given(method("GET"))
                .and(path(files_path.as_str()))
                .and(query_param("per_page", "100"))
        } else {
            Mock::given(method("GET"))
                .and(path(files_path.as_str()))
                .and(query_param("page", page.to_string()))
        };
        mocks.push(mock.respond_with(response));
    }

    mount(pull_state, mocks)
}

#[given("a mock GitHub API server with mergeable pull request {pr:u64}")]
fn seed_mergeable_pull(pull_state: &PullState, pr: u64) -> Result<(), PullsError> {
    runtime(pull_state)?;
    let server_url = server_url(pull_state)?;
    let merge = Mock::given(method("PUT"))
        .and(path(format!("{}/merge", pull_path(pr))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "merged": true,
            "message": "Pull Request successfully merged"
        })));
    mount(pull_state, vec![pull_mock(&server_url, pr), merge])
}

#[given("a mock GitHub API server whose diff for pull request {pr:u64} is gone")]
fn seed_missing_diff(pull_state: &PullState, pr: u64) -> Result<(), PullsError> {
    runtime(pull_state)?;
    let server_url = server_url(pull_state)?;
    // Mounted first so it wins over the JSON route for diff requests.
    let diff = Mock::given(method("GET"))
        .and(path(pull_path(pr)))
        .and(header("accept", "application/vnd.github.diff"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })));
    mount(pull_state, vec![diff, pull_mock(&server_url, pr)])
}

#[given("a mock GitHub API server that rejects token for pull request {pr:u64}")]
fn seed_rejecting_server(pull_state: &PullState, pr: u64) -> Result<(), PullsError> {
    runtime(pull_state)?;
    let rejection = Mock::given(method("GET"))
        .and(path(pull_path(pr)))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        );
    mount(pull_state, vec![rejection])
}

#[given("a personal access token {token}")]
fn remember_token(pull_state: &PullState, token: String) {
    pull_state.token.set(token);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the client loads pull request {pr_url}")]
fn load_pull_request(pull_state: &PullState, pr_url: String) -> Result<(), PullsError> {
    let resolved_url = resolve_server_url(&server_url(pull_state)?, &pr_url);
    let locator = PullRequestLocator::parse(&resolved_url)?;
    pull_state.locator.set(locator.clone());

    let transport = transport(pull_state)?;
    let result = runtime(pull_state)?.block_on(async {
        PullRequests::new(&transport).get(&locator).await
    });

    match result {
        Ok(pull) => {
            drop(pull_state.error.take());
            pull_state.pull.set(pull);
        }
        Err(error) => {
            drop(pull_state.pull.take());
            pull_state.error.set(error);
        }
    }
    Ok(())
}

#[when("the client lists the changed files")]
fn list_files(pull_state: &PullState) -> Result<(), PullsError> {
    let files = with_pull(pull_state, |transport, pull| async move {
        PullRequests::new(&transport)
            .files(&pull, ListOptions::all())
            .collect()
            .await
    })?;
    pull_state.files.set(files);
    Ok(())
}

#[when("the client merges the pull request")]
fn merge_pull(pull_state: &PullState) -> Result<(), PullsError> {
    let merged = with_pull(pull_state, |transport, pull| async move {
        PullRequests::new(&transport)
            .merge(&pull, &MergeOptions::default())
            .await
    })?;
    pull_state.merged.set(merged);
    Ok(())
}

#[when("the client fetches the diff")]
fn fetch_diff(pull_state: &PullState) -> Result<(), PullsError> {
    let diff = with_pull(pull_state, |transport, pull| async move {
        PullRequests::new(&transport).diff(&pull).await
    })?;
    pull_state.diff.set(diff);
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the pull request is titled {expected}")]
fn assert_title(pull_state: &PullState, expected: String) -> Result<(), PullsError> {
    let expected_title = expected.trim_matches('"');
    let title = pull_state
        .pull
        .with_ref(|pull| pull.title.clone())
        .ok_or_else(|| failure("no pull request loaded"))?;

    if title == expected_title {
        Ok(())
    } else {
        Err(failure(format!("expected title {expected_title} but found {title}")))
    }
}

#[then("{count:u64} changed files are listed")]
fn assert_file_count(pull_state: &PullState, count: u64) -> Result<(), PullsError> {
    let actual = pull_state
        .files
        .with_ref(|files| files.len() as u64)
        .ok_or_else(|| failure("files were not listed"))?;

    if actual == count {
        Ok(())
    } else {
        Err(failure(format!("expected {count} files but found {actual}")))
    }
}

#[then("the merge is reported as successful")]
fn assert_merged(pull_state: &PullState) -> Result<(), PullsError> {
    match pull_state.merged.get() {
        Some(true) => Ok(()),
        Some(false) => Err(failure("merge reported as unsuccessful")),
        None => Err(failure("merge was not attempted")),
    }
}

#[then("the diff is empty")]
fn assert_empty_diff(pull_state: &PullState) -> Result<(), PullsError> {
    let length = pull_state
        .diff
        .with_ref(Vec::len)
        .ok_or_else(|| failure("diff was not fetched"))?;

    if length == 0 {
        Ok(())
    } else {
        Err(failure(format!("expected an empty diff but got {length} bytes")))
    }
}

#[then("the error mentions authentication failure")]
fn assert_authentication_error(pull_state: &PullState) -> Result<(), PullsError> {
    let error = pull_state
        .error
        .get()
        .ok_or_else(|| failure("expected authentication error"))?;

    if let PullsError::Authentication { message } = error {
        if message.to_lowercase().contains("credentials") {
            return Ok(());
        }
        return Err(failure(format!(
            "authentication error did not mention credentials: {message}"
        )));
    }

    Err(failure(format!(
        "expected Authentication variant, got {error:?}"
    )))
}

#[scenario(path = "tests/features/pull_requests.feature", index = 0)]
fn load_and_list_files(pull_state: PullState) {
    let _ = pull_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 1)]
fn files_follow_pages(pull_state: PullState) {
    let _ = pull_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 2)]
fn merge_mergeable_pull(pull_state: PullState) {
    let _ = pull_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 3)]
fn missing_diff_is_empty(pull_state: PullState) {
    let _ = pull_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 4)]
fn rejected_token(pull_state: PullState) {
    let _ = pull_state;
}
