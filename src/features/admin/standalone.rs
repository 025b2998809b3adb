//! 独立部署形态：只暴露管理员读取接口
//!
//! 与主服务共用存储与配置（service_role 密钥），口令通过 `?password=` 传入且不做 trim，
//! 成功时直接返回记录数组。

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;

use crate::authz::Scope;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::Submission;

#[derive(Debug, Default, Deserialize)]
pub struct PasswordQuery {
    pub password: Option<String>,
}

/// 口令错误返回 401 `{"error":"Unauthorized"}`；成功返回按时间倒序的记录数组
pub async fn get_submissions_fn(
    State(state): State<AppState>,
    Query(q): Query<PasswordQuery>,
) -> Result<Json<Vec<Submission>>, AppError> {
    if !state
        .authorizer
        .authorize(Scope::Admin, q.password.as_deref())
    {
        return Err(AppError::Unauthorized("Unauthorized".into()));
    }

    let rows = state.store.list_newest_first().await.map_err(|e| {
        tracing::error!(target: "qr_checkin::admin", "read error: {e}");
        AppError::Store(e)
    })?;
    Ok(Json(rows))
}

pub fn create_standalone_router() -> Router<AppState> {
    Router::new().route("/api/submissions", get(get_submissions_fn))
}
