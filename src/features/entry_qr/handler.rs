use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};
use qrcode::{QrCode, render::svg};
use serde::Deserialize;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct QrQuery {
    /// 边长（像素），默认 320，范围 128..=1024
    pub size: Option<u32>,
}

/// 解析签到页地址：优先使用配置中的 public_url，否则按请求 Host 推断
pub fn checkin_url(public_url: Option<&str>, headers: &HeaderMap) -> Option<String> {
    if let Some(url) = public_url.map(str::trim).filter(|u| !u.is_empty()) {
        return Some(url.to_string());
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|p| *p == "https" || *p == "http")
        .unwrap_or("http");
    Some(format!("{scheme}://{host}/"))
}

#[utoipa::path(
    get,
    path = "/api/qrcode.svg",
    summary = "签到入口二维码",
    description = "返回指向签到页的 SVG 二维码，用于打印张贴。",
    params(("size" = Option<u32>, Query, description = "边长（像素），默认 320")),
    responses(
        (status = 200, description = "SVG 图片", body = String, content_type = "image/svg+xml"),
        (status = 400, description = "无法确定签到页地址", body = ErrorBody),
        (status = 500, description = "生成失败", body = ErrorBody)
    ),
    tag = "Check-in"
)]
pub async fn get_checkin_qrcode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(q): Query<QrQuery>,
) -> Result<Response, AppError> {
    let url = checkin_url(state.config.intake.public_url.as_deref(), &headers).ok_or_else(|| {
        AppError::Validation("cannot determine check-in URL; set intake.public_url".into())
    })?;
    let size = q.size.unwrap_or(320).clamp(128, 1024);

    let code = QrCode::new(url.as_bytes())
        .map_err(|e| AppError::Internal(format!("生成二维码失败: {e}")))?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .dark_color(svg::Color("#000"))
        .light_color(svg::Color("#fff"))
        .build();

    let mut res = image.into_response();
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("image/svg+xml"),
    );
    Ok(res)
}

pub fn create_qrcode_router() -> Router<AppState> {
    Router::new().route("/qrcode.svg", get(get_checkin_qrcode))
}
