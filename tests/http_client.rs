//! `HttpMatchClient` against an in-process match server.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};
use skirmish_client::TransportError;
use skirmish_client::client::{HttpMatchClient, MatchService};
use skirmish_client::core::{MatchId, PlayerActionRequest};

struct TestServer {
    url: String,
    _runtime: tokio::runtime::Runtime,
}

fn serve(app: Router) -> TestServer {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    runtime.spawn(async move { axum::serve(listener, app).await.unwrap() });
    TestServer {
        url: format!("http://{addr}"),
        _runtime: runtime,
    }
}

fn snapshot(id: &str, current: &str) -> Value {
    json!({
        "id": id,
        "state": {
            "currentPlayer": current,
            "heroes": [{"id": "thor", "stats": {"health": 80, "stamina": 60},
                        "abilities": [{"id": "strike"}]}],
            "enemies": [{"id": "thanos", "stats": {"health": 100, "stamina": 50}}]
        }
    })
}

type Received = Arc<Mutex<Vec<(String, Value)>>>;

async fn create_game() -> Json<Value> {
    Json(snapshot("m-42", "thor"))
}

async fn apply_action(
    State(received): State<Received>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    received.lock().push((id.clone(), body));
    Json(snapshot(&id, "thanos"))
}

fn arena(received: Received) -> Router {
    Router::new()
        .route("/game", post(create_game))
        .route("/game/{id}/apply-action", post(apply_action))
        .with_state(received)
}

#[test]
fn creates_a_match_and_submits_an_action() {
    let received = Received::default();
    let server = serve(arena(received.clone()));
    let client = HttpMatchClient::new(&format!("{}/", server.url));

    let created = client.create_match().unwrap();
    assert_eq!(created.id, MatchId("m-42".into()));
    assert_eq!(created.current_player(), "thor");
    assert_eq!(created.current_abilities()[0].id, "strike");

    let action = PlayerActionRequest {
        target_id: "thanos".into(),
        ability_index: 0,
    };
    let next = client.submit_action(&created.id, &action).unwrap();
    assert_eq!(next.current_player(), "thanos");
    assert!(next.current_abilities().is_empty());

    assert_eq!(
        *received.lock(),
        [(
            "m-42".to_string(),
            json!({"targetId": "thanos", "ability": 0})
        )]
    );
}

#[test]
fn non_success_status_is_reported_with_its_code() {
    let server = serve(Router::new().route(
        "/game",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
    ));
    let client = HttpMatchClient::new(&server.url);

    let report = client.create_match().unwrap_err();
    assert_eq!(*report.current_context(), TransportError::Status(503));
}

#[test]
fn malformed_body_is_reported() {
    let server = serve(Router::new().route(
        "/game/{id}/apply-action",
        post(|| async { Json(json!({"id": "m-1"})) }),
    ));
    let client = HttpMatchClient::new(&server.url);
    let action = PlayerActionRequest {
        target_id: "thanos".into(),
        ability_index: 0,
    };

    let report = client
        .submit_action(&MatchId("m-1".into()), &action)
        .unwrap_err();
    assert_eq!(*report.current_context(), TransportError::Malformed);
}

#[test]
fn unreachable_server_is_a_network_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = HttpMatchClient::new(&format!("http://127.0.0.1:{port}"));

    let report = client.create_match().unwrap_err();
    assert_eq!(*report.current_context(), TransportError::Network);
}
