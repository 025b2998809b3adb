//! 共享口令鉴权
//!
//! 处理器只依赖 [`Authorizer`]，具体比较方式（明文、常量时间、按用户凭据）可整体替换。

use crate::config::AuthConfig;

/// 受保护的操作范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// 提交签到（门禁码）
    CheckIn,
    /// 查看/导出记录（管理员口令）
    Admin,
}

/// 鉴权能力
pub trait Authorizer: Send + Sync {
    /// `presented` 为请求携带的口令；缺失时传 `None`
    fn authorize(&self, scope: Scope, presented: Option<&str>) -> bool;
}

/// 明文比较两个共享口令
///
/// 与部署环境中的 DOOR_CODE / ADMIN_PWD 逐字比较，不做哈希、不限速。
#[derive(Clone)]
pub struct SharedSecretAuthorizer {
    door_code: String,
    admin_password: String,
}

impl SharedSecretAuthorizer {
    pub fn new(door_code: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            door_code: door_code.into(),
            admin_password: admin_password.into(),
        }
    }

    pub fn from_config(cfg: &AuthConfig) -> Self {
        Self::new(cfg.door_code.clone(), cfg.admin_password.clone())
    }
}

impl Authorizer for SharedSecretAuthorizer {
    fn authorize(&self, scope: Scope, presented: Option<&str>) -> bool {
        let Some(presented) = presented else {
            return false;
        };
        let expected = match scope {
            Scope::CheckIn => &self.door_code,
            Scope::Admin => &self.admin_password,
        };
        !expected.is_empty() && presented == expected
    }
}
