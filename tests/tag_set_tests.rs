//! End-to-end tests for `fleet tag set` against a mock fleet API.

mod support;

use std::process::Output;

use assert_cmd::Command;
use serde_json::json;
use tempfile::{tempdir, TempDir};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use support::fleet_against;

const FULL_COMMIT: &str = "b376b0e544e9429483b656490e5b9443b4349bd6";

/// Run the binary off the async test thread and collect its output.
async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn tag_set(dir: &TempDir, server: &MockServer, args: &[&str]) -> Command {
    let mut cmd = fleet_against(dir, &server.uri());
    cmd.args(["tag", "set"]).args(args);
    cmd
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn test_tag_application_by_name() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v6/application"))
        .and(matchers::query_param("$filter", "app_name eq 'MyApp'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"d": [{"id": 55}]})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v6/application_tag"))
        .and(matchers::header("authorization", "Bearer test-token"))
        .and(matchers::body_json(json!({
            "application": 55,
            "tag_key": "mySimpleTag",
            "value": "",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(tag_set(&dir, &server, &["mySimpleTag", "--application", "MyApp"])).await;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_tag_device_json_output() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v6/device"))
        .and(matchers::query_param("$filter", "startswith(uuid,'7cf02a6')"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"d": [{"id": 9}]})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v6/device_tag"))
        .and(matchers::body_json(json!({
            "device": 9,
            "tag_key": "myCompositeTag",
            "value": "myTagValue",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = tag_set(
        &dir,
        &server,
        &["myCompositeTag", "myTagValue", "--device", "7cf02a6"],
    );
    cmd.args(["--format", "json"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        json!({
            "resource": "device",
            "target": "7cf02a6",
            "tag_key": "myCompositeTag",
            "value": "myTagValue",
        })
    );
}

#[tokio::test]
async fn test_existing_tag_is_updated() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v6/device_tag"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Unique key constraint violated"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(matchers::method("PATCH"))
        .and(matchers::path("/v6/device_tag"))
        .and(matchers::query_param(
            "$filter",
            "device eq 42 and tag_key eq 'myCompositeTag'",
        ))
        .and(matchers::body_json(json!({"value": "my tag value with whitespaces"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(tag_set(
        &dir,
        &server,
        &[
            "myCompositeTag",
            "my tag value with whitespaces",
            "--device",
            "42",
        ],
    ))
    .await;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
}

#[tokio::test]
async fn test_tag_release_by_id() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v6/release(1234)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": [{"id": 1234, "commit": FULL_COMMIT}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v6/release_tag"))
        .and(matchers::body_json(json!({
            "release": 1234,
            "tag_key": "myCompositeTag",
            "value": "",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(tag_set(&dir, &server, &["myCompositeTag", "--release", "1234"])).await;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
}

#[tokio::test]
async fn test_ambiguous_release_exit_code_3() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v6/release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "d": [
                {"id": 1, "commit": "b376aaaa"},
                {"id": 2, "commit": "b376bbbb"},
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v6/release_tag"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = tag_set(&dir, &server, &["k", "--release", "b376"]);
    cmd.args(["--format", "json"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "ambiguous_release");
    assert_eq!(json["error"]["candidates"], json!(["b376aaaa", "b376bbbb"]));
}

#[tokio::test]
async fn test_unknown_release_exit_code_3() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v6/release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"d": []})))
        .mount(&server)
        .await;

    let output = run(tag_set(&dir, &server, &["k", "--release", "deadbeef"])).await;

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("deadbeef"));
}

#[tokio::test]
async fn test_rejected_token_exit_code_1() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v6/application_tag"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let output = run(tag_set(&dir, &server, &["k", "--application", "1234"])).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("401"));
}

#[tokio::test]
async fn test_wrong_api_route_is_failure_not_missing_application() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v6/application"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
        .mount(&server)
        .await;

    let output = run(tag_set(&dir, &server, &["k", "--application", "MyApp"])).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("404"));
    assert!(stderr(&output).contains("no such route"));
}

#[tokio::test]
async fn test_token_from_config_file() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("api_url = \"{}\"\ntoken = \"file-token\"\n", server.uri()),
    )
    .unwrap();

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v6/application_tag"))
        .and(matchers::header("authorization", "Bearer file-token"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = support::fleet(&dir);
    cmd.args(["tag", "set", "k", "--app", "1234"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stderr(&output).contains("--app is deprecated"));
}
