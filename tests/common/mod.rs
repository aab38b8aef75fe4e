#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use acegre_backend::config::Config;
use acegre_backend::services::llm_provider::ProviderConfig;

pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

pub fn test_config(provider: ProviderConfig, dir: &TempDir) -> Config {
    Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        log_level: "warn".to_string(),
        log_dir: None,
        users_file: dir.path().join("users.json"),
        secure_cookies: false,
        provider,
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(ProviderConfig::disabled())
}

pub fn create_test_app_with(provider: ProviderConfig) -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let router = acegre_backend::create_app(test_config(provider, &dir));
    TestApp { router, _dir: dir }
}

pub fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("session_id={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

/// Registers `email` with a fixed password and returns a session token.
pub async fn login_as(router: &Router, email: &str) -> String {
    let (status, _, _) = send(
        router,
        json_request(
            Method::POST,
            "/api/register",
            serde_json::json!({"name": "Tester", "email": email, "password": "secret1"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(
        router,
        json_request(
            Method::POST,
            "/api/login",
            serde_json::json!({"email": email, "password": "secret1"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}

/// Serves `app` on an ephemeral local port.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A local address with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
