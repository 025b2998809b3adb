mod common;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{StatusCode, header};

use common::{ADMIN_PWD, body_bytes, body_json, get, test_config};
use qr_checkin::{AppState, app::build_router, authz::SharedSecretAuthorizer, store::MemoryStore};

fn temp_public_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("qr-checkin-public-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    std::fs::write(dir.join("index.html"), "<h1>Check in</h1>").expect("write index");
    std::fs::write(dir.join("admin.html"), "<h1>Admin</h1>").expect("write admin");
    std::fs::write(dir.join("style.css"), "body{}").expect("write css");
    dir
}

fn app_serving(dir: &std::path::Path) -> axum::Router {
    let mut cfg = test_config();
    cfg.static_files.dir = dir.to_string_lossy().into_owned();
    let authorizer = Arc::new(SharedSecretAuthorizer::from_config(&cfg.auth));
    build_router(AppState::new(cfg, Arc::new(MemoryStore::new()), authorizer))
}

#[tokio::test]
async fn root_serves_index_page() {
    let dir = temp_public_dir();
    let app = app_serving(&dir);

    let resp = get(&app, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(ct.starts_with("text/html"), "content-type: {ct}");
    assert_eq!(body_bytes(resp).await, b"<h1>Check in</h1>");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn admin_path_serves_admin_page_without_password() {
    let dir = temp_public_dir();
    let app = app_serving(&dir);

    let resp = get(&app, "/admin").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"<h1>Admin</h1>");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn other_assets_come_from_public_dir() {
    let dir = temp_public_dir();
    let app = app_serving(&dir);

    let resp = get(&app, "/style.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"body{}");

    let resp = get(&app, "/missing.js").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn api_routes_take_precedence_over_static_files() {
    let dir = temp_public_dir();
    std::fs::create_dir_all(dir.join("api")).expect("mkdir api");
    std::fs::write(dir.join("api").join("submissions"), "shadow").expect("write shadow");
    let app = app_serving(&dir);

    let resp = get(&app, &format!("/api/submissions?pwd={ADMIN_PWD}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    assert_eq!(v["ok"], true);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn health_reports_store_backend() {
    let (app, _) = common::memory_app();
    let resp = get(&app, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    assert_eq!(v["status"], "healthy");
    assert_eq!(v["service"], "qr-checkin");
    assert_eq!(v["store"], "memory");
}

#[tokio::test]
async fn openapi_document_lists_public_routes() {
    let (app, _) = common::memory_app();
    let resp = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;
    let paths = v["paths"].as_object().expect("paths");
    for p in ["/api/checkin", "/api/submissions", "/api/export.csv", "/health"] {
        assert!(paths.contains_key(p), "missing {p}");
    }
}

#[tokio::test]
async fn qrcode_points_at_request_host() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let (app, _) = common::memory_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/qrcode.svg?size=200")
                .header(header::HOST, "192.168.1.20:3000")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("call app");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/svg+xml")
    );
    let svg = String::from_utf8(body_bytes(resp).await).expect("utf8");
    assert!(svg.contains("<svg"));

    let resp = get(&common::memory_app().0, "/api/qrcode.svg").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
