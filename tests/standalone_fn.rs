mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use common::{ADMIN_PWD, FailingStore, body_json, entry, get, state_with};
use qr_checkin::{app::build_standalone_router, store::MemoryStore};

#[tokio::test]
async fn returns_bare_array_newest_first() {
    let store = Arc::new(MemoryStore::new());
    let base = Utc::now();
    store.insert_at(entry("old"), base - Duration::hours(1)).await;
    store.insert_at(entry("new"), base).await;
    let app = build_standalone_router(state_with(store));

    let resp = get(&app, &format!("/api/submissions?password={ADMIN_PWD}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    let arr = v.as_array().expect("bare array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["name"], "new");
    assert_eq!(arr[1]["name"], "old");
}

#[tokio::test]
async fn wrong_or_missing_password_is_401() {
    let app = build_standalone_router(state_with(Arc::new(MemoryStore::new())));
    for uri in [
        "/api/submissions",
        "/api/submissions?password=wrong",
        // 独立函数不做 trim
        "/api/submissions?password=%20demo123",
        // 主服务的 pwd 参数在这里无效
        "/api/submissions?pwd=demo123",
    ] {
        let resp = get(&app, uri).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({"error": "Unauthorized"}),
            "uri: {uri}"
        );
    }
}

#[tokio::test]
async fn checkin_is_not_exposed() {
    let app = build_standalone_router(state_with(Arc::new(MemoryStore::new())));
    let resp = common::post_json(
        &app,
        "/api/checkin",
        serde_json::json!({"name": "Ana", "doorCode": "1234"}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_failure_is_500() {
    let app = build_standalone_router(state_with(Arc::new(FailingStore {
        message: "JWT expired".to_string(),
    })));
    let resp = get(&app, &format!("/api/submissions?password={ADMIN_PWD}")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let v = body_json(resp).await;
    assert_eq!(v["error"], "JWT expired");
}

#[tokio::test]
async fn only_the_read_route_is_mounted() {
    let app = build_standalone_router(state_with(Arc::new(MemoryStore::new())));
    for uri in ["/health", "/docs/", "/api-docs/openapi.json", "/", "/admin"] {
        let resp = get(&app, uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri: {uri}");
    }
}
