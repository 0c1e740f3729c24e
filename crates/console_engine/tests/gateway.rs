mod common;

use std::sync::Arc;

use common::{credential_store, gateway, ScriptedPrompt};
use console_engine::{ApiRequest, Credential, KeyValueStore, NoPrompt, CREDENTIAL_KEY};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_protected(server: &MockServer, raw: &str, expected_authorized: u64) {
    Mock::given(method("GET"))
        .and(path("/api/hr/candidates"))
        .and(header("authorization", format!("Basic {raw}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items":[]}"#))
        .with_priority(1)
        .expect(expected_authorized)
        .mount(server)
        .await;
}

#[tokio::test]
async fn rejected_anonymous_request_prompts_once_and_retries() {
    console_logging::initialize_for_tests();
    let server = MockServer::start().await;
    mount_protected(&server, "dXNlcjpwYXNz", 1).await;
    Mock::given(method("GET"))
        .and(path("/api/hr/candidates"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let credentials = credential_store(&temp);
    let prompt = ScriptedPrompt::answering("dXNlcjpwYXNz");
    let gateway = gateway(&server.uri(), credentials.clone(), prompt.clone());

    let response = gateway
        .send(&ApiRequest::get("/api/hr/candidates"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(prompt.calls(), 1);
    assert_eq!(credentials.get(), Some(Credential::new("dXNlcjpwYXNz")));
    let durable = KeyValueStore::new(temp.path()).read(CREDENTIAL_KEY).unwrap();
    assert_eq!(durable.as_deref(), Some("dXNlcjpwYXNz"));
}

#[tokio::test]
async fn stored_credential_is_attached_without_prompting() {
    let server = MockServer::start().await;
    mount_protected(&server, "c3RvcmVk", 1).await;

    let temp = TempDir::new().unwrap();
    KeyValueStore::new(temp.path())
        .write(CREDENTIAL_KEY, "c3RvcmVk")
        .unwrap();
    let prompt = ScriptedPrompt::answering("unused");
    let gateway = gateway(&server.uri(), credential_store(&temp), prompt.clone());

    let response = gateway
        .send(&ApiRequest::get("/api/hr/candidates"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(prompt.calls(), 0);
}

#[tokio::test]
async fn rejection_with_credential_attached_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/manager/positions"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let credentials = credential_store(&temp);
    credentials.set(Credential::new("aHI6aHI=")).unwrap();
    let prompt = ScriptedPrompt::answering("bWFuYWdlcjpt");
    let gateway = gateway(&server.uri(), credentials.clone(), prompt.clone());

    let response = gateway
        .send(&ApiRequest::get("/api/manager/positions"))
        .await
        .unwrap();

    assert_eq!(response.status, 403);
    assert_eq!(prompt.calls(), 0);
    assert_eq!(credentials.get(), Some(Credential::new("aHI6aHI=")));
}

#[tokio::test]
async fn retried_request_that_still_fails_is_returned_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hr/candidates"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let prompt = ScriptedPrompt::answering("d3Jvbmc6cGFzcw==");
    let gateway = gateway(&server.uri(), credential_store(&temp), prompt.clone());

    let response = gateway
        .send(&ApiRequest::get("/api/hr/candidates"))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(prompt.calls(), 1);
}

#[tokio::test]
async fn declined_prompt_returns_original_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hr/candidates"))
        .respond_with(ResponseTemplate::new(401).set_body_string("login required"))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let credentials = credential_store(&temp);
    let prompt = ScriptedPrompt::declining();
    let gateway = gateway(&server.uri(), credentials.clone(), prompt.clone());

    let response = gateway
        .send(&ApiRequest::get("/api/hr/candidates"))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(response.body, "login required");
    assert_eq!(prompt.calls(), 1);
    assert_eq!(credentials.get(), None);
}

#[tokio::test]
async fn non_auth_failures_pass_through_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hr/candidates"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let gateway = gateway(&server.uri(), credential_store(&temp), Arc::new(NoPrompt));

    let response = gateway
        .send(&ApiRequest::get("/api/hr/candidates"))
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body, "boom");
}
