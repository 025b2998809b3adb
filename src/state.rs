use std::sync::Arc;

use crate::authz::{Authorizer, SharedSecretAuthorizer};
use crate::config::AppConfig;
use crate::error::StoreError;
use crate::store::{SubmissionStore, build_store};

/// 聚合的应用共享状态
///
/// 所有字段只读；请求之间不共享可变状态。
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn SubmissionStore>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn SubmissionStore>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            authorizer,
        }
    }

    /// 按配置构建存储后端与明文口令鉴权
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let store = build_store(&config.store)?;
        let authorizer = Arc::new(SharedSecretAuthorizer::from_config(&config.auth));
        Ok(Self::new(config, store, authorizer))
    }
}
