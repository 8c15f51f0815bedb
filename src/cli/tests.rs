//! Tests for action dispatch against a mock GitHub server.

use pullwire::config::Action;
use pullwire::github::models::test_support::{pull_file_json_at, pull_request_json_at};
use pullwire::github::PullRequestLocator;
use pullwire::{OctocrabTransport, PersonalAccessToken, PullwireConfig};
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::execute;

const PULL_PATH: &str = "/api/v3/repos/octo/widgets/pulls/42";

struct Harness {
    server: MockServer,
    transport: OctocrabTransport,
    locator: PullRequestLocator,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let api_base = format!("{}/api/v3", server.uri());
    let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
    let transport = OctocrabTransport::for_token(&token, &api_base).expect("transport should build");
    let locator = PullRequestLocator::parse(&format!("{}/octo/widgets/pull/42", server.uri()))
        .expect("locator should parse");

    Mock::given(method("GET"))
        .and(path(PULL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(pull_request_json_at(&api_base, "octo", "widgets", 42)),
        )
        .mount(&server)
        .await;

    Harness {
        server,
        transport,
        locator,
    }
}

async fn run_action(harness: &Harness, config: &PullwireConfig, action: Action) -> String {
    let mut buffer = Vec::new();
    execute(
        &harness.transport,
        &harness.locator,
        config,
        action,
        &mut buffer,
    )
    .await
    .expect("action should succeed");
    String::from_utf8(buffer).expect("output should be UTF-8")
}

#[rstest]
#[tokio::test]
async fn summary_prints_the_pull_request() {
    let harness = harness().await;

    let output = run_action(&harness, &PullwireConfig::default(), Action::Summary).await;

    assert!(output.starts_with("<Pull Request [#42]>"), "{output}");
}

#[rstest]
#[tokio::test]
async fn files_respect_the_configured_limit() {
    let harness = harness().await;
    let api_base = format!("{}/api/v3", harness.server.uri());
    Mock::given(method("GET"))
        .and(path(format!("{PULL_PATH}/files")))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            pull_file_json_at(&api_base, "src/lib.rs"),
            pull_file_json_at(&api_base, "src/main.rs")
        ])))
        .mount(&harness.server)
        .await;
    let config = PullwireConfig {
        limit: Some(1),
        ..Default::default()
    };

    let output = run_action(&harness, &config, Action::Files).await;

    assert_eq!(output.lines().count(), 1, "{output}");
    assert!(output.contains("src/lib.rs"));
}

#[rstest]
#[tokio::test]
async fn merge_sends_configured_options() {
    let harness = harness().await;
    Mock::given(method("PUT"))
        .and(path(format!("{PULL_PATH}/merge")))
        .and(body_json(json!({ "squash": true, "commit_message": "Release" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "merged": true })))
        .expect(1)
        .mount(&harness.server)
        .await;
    let config = PullwireConfig {
        merge_message: Some("Release".to_owned()),
        squash: true,
        ..Default::default()
    };

    let output = run_action(&harness, &config, Action::Merge).await;

    assert_eq!(output, "<Pull Request [#42]>: merged\n");
}

#[rstest]
#[tokio::test]
async fn close_reports_the_changed_pull_request() {
    let harness = harness().await;
    let mut closed =
        pull_request_json_at(&format!("{}/api/v3", harness.server.uri()), "octo", "widgets", 42);
    closed["state"] = json!("closed");
    Mock::given(method("PATCH"))
        .and(path(PULL_PATH))
        .and(body_json(json!({
            "title": "Pull request 42",
            "body": "Adds widgets.",
            "state": "closed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(closed))
        .expect(1)
        .mount(&harness.server)
        .await;

    let output = run_action(&harness, &PullwireConfig::default(), Action::Close).await;

    assert_eq!(output, "<Pull Request [#42]>: closed\n");
}
