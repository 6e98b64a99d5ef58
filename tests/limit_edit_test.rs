//! End-to-end limit-edit tests against a mocked panel API.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use panel_auth::TokenStore;
use panel_client::HttpPanelClient;
use panel_core::config::api::ApiConfig;
use panel_core::error::ErrorKind;
use panel_core::traits::PanelApi;
use panel_core::types::{ResourceField, UpdateOutcome};
use panel_session::{EditSession, EditState};

fn resources(disk: u64, memory: u64, cpu: u64) -> serde_json::Value {
    json!({
        "diskMb": disk,
        "memoryMb": memory,
        "cpuPercent": cpu,
        "backups": 2,
        "databases": 2,
        "allocations": 2,
    })
}

async fn client_for(server: &MockServer) -> HttpPanelClient {
    let tokens = TokenStore::in_memory();
    tokens.set_token("tok").unwrap();

    let config = ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    };
    HttpPanelClient::new(&config, Arc::new(tokens)).unwrap()
}

/// Mount the three read endpoints with a consistent quota picture:
/// 10000 MB disk entitlement, fully used, 4000 MB of it by srv-1.
async fn mount_reads(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/client/account"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "id": "user-42",
                "username": "kenji",
                "resources": resources(10_000, 4_096, 200),
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/client/usage"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resources(10_000, 2_048, 150)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/client/servers/srv-1"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "srv-1",
            "name": "lobby-1",
            "status": "running",
            "limits": resources(4_000, 1_024, 100),
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_load_and_save_happy_path() {
    let mock = MockServer::start().await;
    mount_reads(&mock).await;

    Mock::given(method("PATCH"))
        .and(path("/api/client/servers/srv-1"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {
                "id": "srv-1",
                "name": "lobby-1",
                "status": "running",
                "limits": resources(4_000, 2_048, 100),
            }
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let api: Arc<dyn PanelApi> = Arc::new(client_for(&mock).await);
    let mut session = EditSession::load(api, "srv-1").await.unwrap();

    // Disk: 10000 entitled minus 6000 held by other servers.
    assert_eq!(session.remaining().disk_mb, 4_000);

    session.set_limit(ResourceField::MemoryMb, 2_048);
    assert!(session.is_submittable());

    let outcome = session.submit().await.unwrap();
    assert!(matches!(outcome, UpdateOutcome::Applied(_)));
    assert_eq!(session.state(), EditState::Saved);
    assert_eq!(session.server().limits.memory_mb, 2_048);
}

#[tokio::test]
async fn test_missing_server_aborts_load() {
    let mock2 = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/client/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "resources": resources(10_000, 4_096, 200) }
        })))
        .mount(&mock2)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/client/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resources(0, 0, 0)))
        .mount(&mock2)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/client/servers/srv-9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "No such server" })),
        )
        .mount(&mock2)
        .await;

    let api: Arc<dyn PanelApi> = Arc::new(client_for(&mock2).await);
    let err = EditSession::load(api, "srv-9").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "No such server");
}

#[tokio::test]
async fn test_panel_violations_reach_the_session() {
    let mock = MockServer::start().await;
    mount_reads(&mock).await;

    Mock::given(method("PATCH"))
        .and(path("/api/client/servers/srv-1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "violations": {
                "memoryMb": "Exceeds available resources",
                "swapMb": "dropped: unknown to this client",
            }
        })))
        .mount(&mock)
        .await;

    let api: Arc<dyn PanelApi> = Arc::new(client_for(&mock).await);
    let mut session = EditSession::load(api, "srv-1").await.unwrap();

    let outcome = session.submit().await.unwrap();
    let UpdateOutcome::Rejected(violations) = outcome else {
        panic!("expected a rejection");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(session.state(), EditState::SaveFailed);
    assert_eq!(
        session.violations()[&ResourceField::MemoryMb],
        "Exceeds available resources"
    );
}

#[tokio::test]
async fn test_generic_patch_failure_is_an_error() {
    let mock = MockServer::start().await;
    mount_reads(&mock).await;

    Mock::given(method("PATCH"))
        .and(path("/api/client/servers/srv-1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Database offline" })),
        )
        .mount(&mock)
        .await;

    let api: Arc<dyn PanelApi> = Arc::new(client_for(&mock).await);
    let mut session = EditSession::load(api, "srv-1").await.unwrap();

    let err = session.submit().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
    assert_eq!(err.message, "Database offline");
    assert_eq!(session.take_error().as_deref(), Some("Database offline"));
}

#[tokio::test]
async fn test_requests_require_a_token() {
    let mock = MockServer::start().await;
    mount_reads(&mock).await;

    let config = ApiConfig {
        base_url: mock.uri(),
        timeout_seconds: 5,
    };
    let client = HttpPanelClient::new(&config, Arc::new(TokenStore::in_memory())).unwrap();

    let err = client.fetch_entitlement().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}
