use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{admin, checkin, entry_qr, health};
use crate::request_id::request_id_middleware;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::features::checkin::handler::post_checkin,
        crate::features::entry_qr::handler::get_checkin_qrcode,
        crate::features::admin::handler::get_submissions,
        crate::features::admin::handler::export_csv,
        crate::features::health::handler::health_check,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::store::Submission,
        crate::features::checkin::CheckinRequest,
        crate::features::checkin::CheckinResponse,
        crate::features::admin::handler::SubmissionsResponse,
        crate::features::health::handler::HealthResponse,
    )),
    tags(
        (name = "Check-in", description = "Visitor check-in APIs"),
        (name = "Admin", description = "Password protected read/export APIs"),
        (name = "Health", description = "Health APIs"),
    ),
    info(
        title = "QR Check-in API",
        version = "0.1.0",
        description = "Door-code gated check-in form backed by Supabase (Axum)"
    )
)]
pub struct ApiDoc;

/// 主服务路由：签到/管理 API、静态页面、文档
pub fn build_router(state: AppState) -> Router {
    let public_dir = state.config.public_dir();

    let api = Router::<AppState>::new()
        .merge(checkin::create_checkin_router())
        .merge(admin::create_admin_router())
        .merge(entry_qr::create_qrcode_router());

    Router::<AppState>::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service("/admin", ServeFile::new(public_dir.join("admin.html")))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(&public_dir))
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

/// 独立部署路由：只有管理员读取接口，不挂载页面、探活与文档
pub fn build_standalone_router(state: AppState) -> Router {
    admin::create_standalone_router()
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
