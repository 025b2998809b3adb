use axum::{Router, body::Bytes, extract::State, response::Json, routing::post};

use crate::authz::Scope;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

use super::models::{CheckinRequest, CheckinResponse};

const MSG_REQUIRED: &str = "Name and Door Code required";
const MSG_BAD_DOOR_CODE: &str = "Invalid Door Code";

#[utoipa::path(
    post,
    path = "/api/checkin",
    summary = "提交签到",
    description = "校验门禁码后写入一条签到记录；门禁码本身不入库。",
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "签到成功", body = CheckinResponse),
        (status = 400, description = "缺少姓名或门禁码", body = ErrorBody),
        (status = 403, description = "门禁码错误", body = ErrorBody),
        (status = 500, description = "数据库写入失败", body = ErrorBody)
    ),
    tag = "Check-in"
)]
pub async fn post_checkin(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CheckinResponse>, AppError> {
    let req = CheckinRequest::from_body(&body);

    let entry = match req.to_entry() {
        Some(entry) if req.has_required_fields() => entry,
        _ => return Err(AppError::Validation(MSG_REQUIRED.into())),
    };

    if !state.authorizer.authorize(Scope::CheckIn, req.door_code()) {
        tracing::warn!(target: "qr_checkin::checkin", "rejected check-in: invalid door code");
        return Err(AppError::Forbidden(MSG_BAD_DOOR_CODE.into()));
    }

    let saved = state.store.insert(entry).await.map_err(|e| {
        tracing::error!(target: "qr_checkin::checkin", backend = state.store.backend_name(), "insert error: {e}");
        AppError::Store(e)
    })?;

    tracing::info!(target: "qr_checkin::checkin", id = %saved.id_text(), "check-in recorded");
    Ok(Json(CheckinResponse {
        ok: true,
        entry: saved,
    }))
}

pub fn create_checkin_router() -> Router<AppState> {
    Router::new().route("/checkin", post(post_checkin))
}
