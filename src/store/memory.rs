use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;

use super::{NewSubmission, Submission, SubmissionStore};

struct Row {
    at: DateTime<Utc>,
    submission: Submission,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Row>,
    next_id: u64,
    last_at: Option<DateTime<Utc>>,
}

/// 进程内存储（本地演示与测试用）
///
/// 模拟数据库行为：插入时生成自增 `id` 与 `timestamp`，同一进程内时间戳严格递增。
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl Inner {
    /// 在同一把写锁内分配 id 并落行，保证 id 顺序与时间顺序一致
    fn push(&mut self, entry: NewSubmission, at: DateTime<Utc>) -> Submission {
        self.next_id += 1;
        let submission = Submission {
            id: Value::from(self.next_id),
            name: entry.name,
            phone: entry.phone,
            email: entry.email,
            household: entry.household,
            kids: entry.kids,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            source: entry.source,
        };
        self.rows.push(Row {
            at,
            submission: submission.clone(),
        });
        submission
    }

    /// 不早于当前时间且严格晚于上一条
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let at = match self.last_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_at = Some(at);
        at
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以指定提交时间插入（用于预置数据）
    pub async fn insert_at(&self, entry: NewSubmission, at: DateTime<Utc>) -> Submission {
        self.inner.write().await.push(entry, at)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, entry: NewSubmission) -> Result<Submission, StoreError> {
        let mut inner = self.inner.write().await;
        let at = inner.next_timestamp();
        Ok(inner.push(entry, at))
    }

    async fn list_newest_first(&self) -> Result<Vec<Submission>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<&Row> = inner.rows.iter().collect();
        rows.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(rows.into_iter().map(|r| r.submission.clone()).collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
