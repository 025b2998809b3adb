use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::StoreError;

use super::{NewSubmission, Submission, SubmissionStore};

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn as_postgrest(self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

/// Supabase REST（PostgREST）最小客户端
///
/// 只实现两种调用：`insert(table, rows)` 与 `select(table).order(column, dir)`。
/// 不做重试；每次调用对应一次 HTTP 往返。
#[derive(Clone)]
pub struct PostgrestClient {
    client: reqwest::Client,
    rest_base: String,
}

impl PostgrestClient {
    /// `project_url` 形如 `https://xyz.supabase.co`，`api_key` 同时用作 apikey 与 Bearer token。
    pub fn new(
        project_url: &str,
        api_key: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| StoreError::Config("service key 含有非法字符".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| StoreError::Config("service key 含有非法字符".to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("qr-checkin/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("初始化 HTTP Client 失败: {e}")))?;

        Ok(Self {
            client,
            rest_base: format!("{}/rest/v1", project_url.trim().trim_end_matches('/')),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_base, table)
    }

    /// 插入若干行并返回数据库回显的完整行（`Prefer: return=representation`）
    pub async fn insert<T, R>(&self, table: &str, rows: &[T]) -> Result<Vec<R>, StoreError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        decode_rows(resp).await
    }

    /// 读取整表并按单列排序
    pub async fn select_ordered<R>(
        &self,
        table: &str,
        column: &str,
        order: Order,
    ) -> Result<Vec<R>, StoreError>
    where
        R: DeserializeOwned,
    {
        let order_param = format!("{column}.{}", order.as_postgrest());
        let resp = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*"), ("order", order_param.as_str())])
            .send()
            .await?;
        decode_rows(resp).await
    }
}

async fn decode_rows<R: DeserializeOwned>(resp: Response) -> Result<Vec<R>, StoreError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if !status.is_success() {
        return Err(StoreError::Rejected {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }
    Ok(serde_json::from_slice(&body)?)
}

/// 提取 PostgREST 错误体中的 message；非 JSON 时退回原始文本或状态行
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(v) = serde_json::from_slice::<Value>(body)
        && let Some(msg) = v
            .get("message")
            .or_else(|| v.get("msg"))
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
        && !msg.is_empty()
    {
        return msg.to_string();
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("error")
    )
}

/// 基于 Supabase 的签到记录存储
#[derive(Clone)]
pub struct SupabaseStore {
    client: PostgrestClient,
    table: String,
}

impl SupabaseStore {
    pub fn new(client: PostgrestClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let client = PostgrestClient::new(&cfg.url, &cfg.service_key, cfg.timeout_duration())?;
        Ok(Self::new(client, cfg.table.clone()))
    }
}

#[async_trait]
impl SubmissionStore for SupabaseStore {
    async fn insert(&self, entry: NewSubmission) -> Result<Submission, StoreError> {
        let rows: Vec<Submission> = self.client.insert(&self.table, &[entry]).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    async fn list_newest_first(&self) -> Result<Vec<Submission>, StoreError> {
        self.client
            .select_ordered(&self.table, "timestamp", Order::Descending)
            .await
    }

    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}
