//! 签到记录存储
//!
//! 持久化完全委托给托管数据库；这里只定义处理器依赖的最小契约：
//! 插入一条记录、按提交时间倒序读取全部记录。

mod memory;
pub mod models;
mod supabase;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::StoreError;

pub use memory::MemoryStore;
pub use models::{NewSubmission, SOURCE_TAG, Submission};
pub use supabase::{Order, PostgrestClient, SupabaseStore};

/// 签到记录存储后端
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// 插入一条记录，返回带有数据库生成字段（id/timestamp）的完整记录
    async fn insert(&self, entry: NewSubmission) -> Result<Submission, StoreError>;

    /// 读取全部记录，按 timestamp 倒序
    async fn list_newest_first(&self) -> Result<Vec<Submission>, StoreError>;

    /// 后端名称（日志用）
    fn backend_name(&self) -> &'static str;
}

/// 根据配置构建存储后端
pub fn build_store(cfg: &StoreConfig) -> Result<Arc<dyn SubmissionStore>, StoreError> {
    match cfg.backend {
        StoreBackend::Supabase => Ok(Arc::new(SupabaseStore::from_config(cfg)?)),
        StoreBackend::Memory => {
            tracing::warn!("使用内存存储：记录仅保存在进程内，重启后丢失");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
