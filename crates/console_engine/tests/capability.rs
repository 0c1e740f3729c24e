mod common;

use std::sync::Arc;

use common::{credential_store, gateway, ScriptedPrompt};
use console_engine::{
    role_from_probe, ApiResponse, CapabilityResolver, NoPrompt, ProbingResolver, Role,
    MANAGER_PROBE_PATH,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string(),
    }
}

#[test]
fn probe_outcomes_map_to_roles() {
    assert_eq!(role_from_probe(&Ok(response(200, "[]"))), Role::Manager);
    assert_eq!(
        role_from_probe(&Ok(response(200, r#"[{"id":1,"name":"Backend"}]"#))),
        Role::Manager
    );
    assert_eq!(role_from_probe(&Ok(response(401, ""))), Role::Hr);
    assert_eq!(role_from_probe(&Ok(response(403, ""))), Role::Hr);
    assert_eq!(role_from_probe(&Ok(response(500, ""))), Role::Unknown);
    assert_eq!(role_from_probe(&Ok(response(404, ""))), Role::Unknown);
}

#[test]
fn success_without_a_listing_is_not_manager() {
    assert_eq!(role_from_probe(&Ok(response(200, "<html>"))), Role::Unknown);
    assert_eq!(role_from_probe(&Ok(response(200, r#"{"items":[]}"#))), Role::Unknown);
}

#[tokio::test]
async fn server_error_resolves_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MANAGER_PROBE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let prompt = ScriptedPrompt::answering("unused");
    let resolver = ProbingResolver::new(gateway(&server.uri(), credential_store(&temp), prompt.clone()));

    assert_eq!(resolver.resolve_role().await, Role::Unknown);
    assert_eq!(prompt.calls(), 0);
}

#[tokio::test]
async fn forbidden_probe_resolves_to_hr() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MANAGER_PROBE_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let resolver =
        ProbingResolver::new(gateway(&server.uri(), credential_store(&temp), Arc::new(NoPrompt)));

    assert_eq!(resolver.resolve_role().await, Role::Hr);
}

#[tokio::test]
async fn manager_listing_resolves_to_manager() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MANAGER_PROBE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let resolver =
        ProbingResolver::new(gateway(&server.uri(), credential_store(&temp), Arc::new(NoPrompt)));

    assert_eq!(resolver.resolve_role().await, Role::Manager);
}

#[tokio::test]
async fn unreachable_server_resolves_to_unknown() {
    let temp = TempDir::new().unwrap();
    let resolver = ProbingResolver::new(gateway(
        "http://127.0.0.1:9",
        credential_store(&temp),
        Arc::new(NoPrompt),
    ));

    assert_eq!(resolver.resolve_role().await, Role::Unknown);
}
