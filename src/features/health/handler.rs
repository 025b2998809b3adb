use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// 健康检查响应
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: &'static str,
    #[schema(example = "qr-checkin")]
    pub service: &'static str,
    /// Cargo package version
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// 当前存储后端（supabase | memory）；探活本身不访问数据库
    #[schema(example = "supabase")]
    pub store: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    summary = "健康检查",
    responses((status = 200, description = "服务健康", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.backend_name(),
    })
}
