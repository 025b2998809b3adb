#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use tower::ServiceExt;

use qr_checkin::{
    AppConfig, AppState, StoreError,
    authz::SharedSecretAuthorizer,
    config::StoreBackend,
    store::{MemoryStore, NewSubmission, Submission, SubmissionStore},
};

pub const DOOR_CODE: &str = "1234";
pub const ADMIN_PWD: &str = "demo123";

/// 总是失败的存储，用于验证 500 分支
pub struct FailingStore {
    pub message: String,
}

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn insert(&self, _entry: NewSubmission) -> Result<Submission, StoreError> {
        Err(StoreError::Rejected {
            status: 500,
            message: self.message.clone(),
        })
    }

    async fn list_newest_first(&self) -> Result<Vec<Submission>, StoreError> {
        Err(StoreError::Rejected {
            status: 500,
            message: self.message.clone(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.store.backend = StoreBackend::Memory;
    cfg.auth.door_code = DOOR_CODE.to_string();
    cfg.auth.admin_password = ADMIN_PWD.to_string();
    cfg
}

pub fn state_with(store: Arc<dyn SubmissionStore>) -> AppState {
    let cfg = test_config();
    let authorizer = Arc::new(SharedSecretAuthorizer::from_config(&cfg.auth));
    AppState::new(cfg, store, authorizer)
}

pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = qr_checkin::app::build_router(state_with(store.clone()));
    (app, store)
}

pub fn failing_app(message: &str) -> Router {
    let store = Arc::new(FailingStore {
        message: message.to_string(),
    });
    qr_checkin::app::build_router(state_with(store))
}

pub fn entry(name: &str) -> NewSubmission {
    NewSubmission {
        name: name.to_string(),
        phone: None,
        email: None,
        household: None,
        kids: false,
        source: "qr-demo".to_string(),
    }
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
        )
        .await
        .expect("call app")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("call app")
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).expect("parse json")
}
