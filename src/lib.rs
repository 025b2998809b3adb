/// 统一错误处理模块
pub mod error;

/// 配置模块
pub mod config;

/// 共享口令鉴权
pub mod authz;

/// 签到记录存储（Supabase / 内存）
pub mod store;

/// 功能聚合模块
pub mod features;

/// 应用状态聚合模块
pub mod state;

/// 路由组装
pub mod app;

/// request_id 中间件
pub mod request_id;

/// 日志初始化
pub mod logging;

/// 启动检查模块
pub mod startup;

/// 优雅退出
pub mod shutdown;

/// HTTP 服务启动
pub mod server;

// 导出常用类型供外部使用
pub use config::AppConfig;
pub use error::{AppError, StoreError};
pub use state::AppState;
