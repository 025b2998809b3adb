use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 应用统一错误类型
///
/// 对外只区分三类：校验失败（400）、口令错误（401/403）、上游存储失败（500）。
#[derive(Error, Debug)]
pub enum AppError {
    /// 缺少必填字段
    #[error("{0}")]
    Validation(String),

    /// 管理员口令错误
    #[error("{0}")]
    Unauthorized(String),

    /// 门禁码错误
    #[error("{0}")]
    Forbidden(String),

    /// 托管数据库返回错误（消息原样透传）
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 本地处理失败（如 CSV 序列化）
    #[error("{0}")]
    Internal(String),
}

/// 托管数据库访问错误
#[derive(Error, Debug)]
pub enum StoreError {
    /// 网络请求错误
    #[error("{0}")]
    Network(String),

    /// 请求超时
    #[error("data store request timed out")]
    Timeout,

    /// 数据库拒绝请求（PostgREST 错误体中的 message）
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 响应无法解析
    #[error("invalid data store response: {0}")]
    Decode(String),

    /// 客户端配置无效（如密钥含非法字符）
    #[error("invalid data store configuration: {0}")]
    Config(String),
}

/// 错误响应体：仅 `{"error": "..."}`，请求追踪 ID 只放在 `x-request-id` 响应头
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// 错误信息
    #[schema(example = "unauthorized")]
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 以纯文本形式输出（供 CSV 导出等非 JSON 接口使用）
    pub fn into_plain_text(self) -> PlainTextError {
        PlainTextError(self)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut res = Json(ErrorBody::new(self.to_string())).into_response();
        *res.status_mut() = status;
        res
    }
}

/// 纯文本错误响应包装
#[derive(Debug)]
pub struct PlainTextError(pub AppError);

impl From<AppError> for PlainTextError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let mut res = (status, self.0.to_string()).into_response();
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        res
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Internal(format!("csv: {err}"))
    }
}
