use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::authz::Scope;
use crate::error::{AppError, ErrorBody, PlainTextError};
use crate::state::AppState;
use crate::store::Submission;

use super::csv_export::render_csv;

const MSG_UNAUTHORIZED: &str = "unauthorized";
const MSG_EXPORT_FAILED: &str = "error exporting CSV";

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    /// 管理员口令（首尾空白会被忽略）
    pub pwd: Option<String>,
}

impl AdminQuery {
    fn presented(&self) -> &str {
        self.pwd.as_deref().unwrap_or("").trim()
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SubmissionsResponse {
    #[schema(example = true)]
    pub ok: bool,
    /// 按提交时间倒序
    pub submissions: Vec<Submission>,
}

fn require_admin(state: &AppState, q: &AdminQuery) -> Result<(), AppError> {
    if state.authorizer.authorize(Scope::Admin, Some(q.presented())) {
        Ok(())
    } else {
        tracing::warn!(target: "qr_checkin::admin", "rejected admin request: bad password");
        Err(AppError::Unauthorized(MSG_UNAUTHORIZED.into()))
    }
}

#[utoipa::path(
    get,
    path = "/api/submissions",
    summary = "查看签到记录",
    description = "需要在查询参数 pwd 中提供管理员口令；返回全部记录，按提交时间倒序。",
    params(("pwd" = String, Query, description = "管理员口令")),
    responses(
        (status = 200, description = "记录列表", body = SubmissionsResponse),
        (status = 401, description = "口令错误", body = ErrorBody),
        (status = 500, description = "数据库读取失败", body = ErrorBody)
    ),
    tag = "Admin"
)]
pub async fn get_submissions(
    State(state): State<AppState>,
    Query(q): Query<AdminQuery>,
) -> Result<Json<SubmissionsResponse>, AppError> {
    require_admin(&state, &q)?;

    let submissions = state.store.list_newest_first().await.map_err(|e| {
        tracing::error!(target: "qr_checkin::admin", backend = state.store.backend_name(), "read error: {e}");
        AppError::Store(e)
    })?;

    Ok(Json(SubmissionsResponse {
        ok: true,
        submissions,
    }))
}

#[utoipa::path(
    get,
    path = "/api/export.csv",
    summary = "导出签到记录（CSV）",
    description = "与查看接口相同的口令校验；以附件形式返回 CSV。错误以纯文本返回。",
    params(("pwd" = String, Query, description = "管理员口令")),
    responses(
        (status = 200, description = "CSV 文件", body = String, content_type = "text/csv"),
        (status = 401, description = "口令错误", body = String, content_type = "text/plain"),
        (status = 500, description = "导出失败", body = String, content_type = "text/plain")
    ),
    tag = "Admin"
)]
pub async fn export_csv(
    State(state): State<AppState>,
    Query(q): Query<AdminQuery>,
) -> Result<Response, PlainTextError> {
    require_admin(&state, &q)?;

    let rows = state.store.list_newest_first().await.map_err(|e| {
        tracing::error!(target: "qr_checkin::admin", backend = state.store.backend_name(), "csv read error: {e}");
        AppError::Internal(MSG_EXPORT_FAILED.into())
    })?;

    let body = render_csv(&rows).map_err(|e| {
        tracing::error!(target: "qr_checkin::admin", "csv render error: {e}");
        AppError::Internal(MSG_EXPORT_FAILED.into())
    })?;

    let mut res = body.into_response();
    let headers = res.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=submissions.csv"),
    );
    Ok(res)
}

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/submissions", get(get_submissions))
        .route("/export.csv", get(export_csv))
}
