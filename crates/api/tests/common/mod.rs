#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use giftigo_api::config::{LogFormat, ServerConfig};
use giftigo_api::router::build_app_router;
use giftigo_api::state::AppState;
use giftigo_core::logo::{DisabledLogoLookup, LogoLookup, LogoLookupError};
use giftigo_core::store::MemoryCardStore;
use giftigo_core::types::OwnerId;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Logo provider with a canned answer.
pub enum StubLogo {
    Found(&'static str),
    Nothing,
    Broken,
}

#[async_trait]
impl LogoLookup for StubLogo {
    async fn find_logo(&self, _brand_name: &str) -> Result<Option<String>, LogoLookupError> {
        match self {
            StubLogo::Found(url) => Ok(Some(url.to_string())),
            StubLogo::Nothing => Ok(None),
            StubLogo::Broken => Err(LogoLookupError::Failed("upstream returned 502".into())),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: LogFormat::Pretty,
        database_url: None,
        brand_logo: None,
    }
}

/// A router over a fresh in-memory store, plus a handle on that store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCardStore>,
}

pub fn build_test_app() -> TestApp {
    build_test_app_with_logo(Arc::new(DisabledLogoLookup))
}

pub fn build_test_app_with_logo(logo: Arc<dyn LogoLookup>) -> TestApp {
    let store = Arc::new(MemoryCardStore::new());
    let state = AppState {
        store: store.clone(),
        logo,
        config: Arc::new(test_config()),
    };
    TestApp {
        router: build_app_router(state),
        store,
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, owner: Option<OwnerId>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header("x-owner-id", owner.to_string());
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str, owner: Option<OwnerId>) -> Response<Body> {
    send(app, request(Method::GET, uri, owner, None)).await
}

pub async fn post_json(app: &Router, uri: &str, owner: OwnerId, body: &Value) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(owner), Some(body))).await
}

pub async fn post_empty(app: &Router, uri: &str, owner: OwnerId) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(owner), None)).await
}

pub async fn put_json(app: &Router, uri: &str, owner: OwnerId, body: &Value) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(owner), Some(body))).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a card and return its `data` payload.
pub async fn create_card(app: &Router, owner: OwnerId, body: Value) -> Value {
    let response = post_json(app, "/api/v1/cards", owner, &body).await;
    assert_eq!(response.status(), 201, "card creation failed");
    body_json(response).await["data"].clone()
}
