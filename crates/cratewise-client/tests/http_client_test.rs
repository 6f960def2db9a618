use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use cratewise_client::client::{HttpRecommendClient, RecommendClient};
use cratewise_client::error::ClientError;
use cratewise_core::query::{Query, QueryRequest};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

type Captured = Arc<Mutex<Option<Value>>>;

/// Serve `app` on an ephemeral local port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn request(query: &str, context: Option<&str>) -> QueryRequest {
    QueryRequest::new(Query::new(query).unwrap(), context)
}

async fn capture(State(seen): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    *seen.lock().unwrap() = Some(body);
    Json(json!({"crates": [], "explanation": "no match found"}))
}

#[tokio::test]
async fn posts_query_and_context_as_json() {
    let seen: Captured = Arc::default();
    let app = Router::new()
        .route("/api/recommend", post(capture))
        .with_state(seen.clone());
    let client = HttpRecommendClient::new(serve(app).await);

    let resp = client
        .recommend(&request("need an http client", Some("async web server")))
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("no match found"));
    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body, json!({"query": "need an http client", "context": "async web server"}));
}

#[tokio::test]
async fn omits_absent_context() {
    let seen: Captured = Arc::default();
    let app = Router::new()
        .route("/api/recommend", post(capture))
        .with_state(seen.clone());
    let client = HttpRecommendClient::new(serve(app).await);

    client.recommend(&request("orm", Some(""))).await.unwrap();

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body, json!({"query": "orm"}));
}

#[tokio::test]
async fn error_status_is_returned_not_raised() {
    let app = Router::new().route(
        "/api/recommend",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "quota exhausted") }),
    );
    let client = HttpRecommendClient::new(serve(app).await);

    let resp = client.recommend(&request("orm", None)).await.unwrap();

    assert_eq!(resp.status, 500);
    assert_eq!(resp.body, "quota exhausted");
    assert!(!resp.is_success());
}

#[tokio::test]
async fn unreachable_backend_is_an_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpRecommendClient::new(format!("http://{addr}"));

    let err = client.recommend(&request("orm", None)).await.unwrap_err();

    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn health_ok() {
    let app = Router::new().route("/health", get(|| async { "OK" }));
    let client = HttpRecommendClient::new(serve(app).await);
    client.health().await.unwrap();
}

#[tokio::test]
async fn health_reports_unexpected_status() {
    let app = Router::new().route(
        "/health",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let client = HttpRecommendClient::new(serve(app).await);

    let err = client.health().await.unwrap_err();

    match err {
        ClientError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn truncated_error_body_still_reports_the_status() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // Drain the request; its JSON body is the last thing sent.
        let mut seen = Vec::new();
        let mut buf = [0u8; 1024];
        while !seen.ends_with(b"}") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
        }
        // Promise more body than is sent, then hang up.
        socket
            .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\nshort")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    let client = HttpRecommendClient::new(format!("http://{addr}"));

    let resp = client.recommend(&request("orm", None)).await.unwrap();

    assert_eq!(resp.status, 502);
    assert!(!resp.is_success());
}
