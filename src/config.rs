use config::{Config as ConfigBuilder, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 默认配置文件路径（可通过 `APP_CONFIG_PATH` 覆盖）
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 历史部署沿用的环境变量 -> 配置键
///
/// 这些变量优先级最高，覆盖配置文件与 `APP_*` 变量。
const LEGACY_ENV_KEYS: [(&str, &str); 5] = [
    ("DOOR_CODE", "auth.door_code"),
    ("ADMIN_PWD", "auth.admin_password"),
    ("SUPABASE_URL", "store.url"),
    ("SUPABASE_SERVICE_KEY", "store.service_key"),
    ("PORT", "server.port"),
];

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// 共享口令配置
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 签到门禁码
    pub door_code: String,
    /// 管理员口令（查看/导出）
    pub admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            door_code: "1234".to_string(),
            admin_password: "demo123".to_string(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("door_code", &"***")
            .field("admin_password", &"***")
            .finish()
    }
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Supabase（PostgREST over HTTP）
    #[default]
    Supabase,
    /// 进程内存（本地演示/测试，重启即丢失）
    Memory,
}

/// 托管数据库配置
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Supabase 项目地址，例如 https://xyz.supabase.co
    pub url: String,
    /// service_role 密钥
    pub service_key: String,
    /// 表名
    pub table: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            service_key: String::new(),
            table: "submissions".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.service_key.is_empty() {
            "<unset>"
        } else {
            "***"
        };
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("url", &self.url)
            .field("service_key", &key)
            .field("table", &self.table)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// 签到入口配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// 对外公开的签到页地址（用于生成二维码）；缺省时按请求 Host 推断
    pub public_url: Option<String>,
}

/// 静态页面配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// 静态资源目录（包含 index.html 与 admin.html）
    pub dir: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: "./public".to_string(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（RUST_LOG 未设置时生效）
    pub level: String,
    /// 日志格式：full | json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "full".to_string(),
        }
    }
}

/// 优雅退出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// 收到退出信号后等待在途请求完成的最长时间（秒）
    pub timeout_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl ShutdownConfig {
    /// 下限 1 秒
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// 应用配置
///
/// 启动时构造一次，之后以 `Arc` 形式只读共享给所有请求处理器。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl AppConfig {
    /// 从配置文件加载配置，支持环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let vars: Map<String, String> = std::env::vars().collect();
        let path = vars
            .get("APP_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_with(&path, vars)
    }

    /// 以给定的配置文件与环境变量快照加载配置
    ///
    /// 优先级（低 -> 高）：内置默认值、配置文件（可缺省）、`APP_*` 变量、历史变量。
    pub fn load_with(path: &Path, vars: Map<String, String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .add_source(File::from(path).required(false))
            // 例如：APP_SERVER__PORT=8080、APP_STORE__BACKEND=memory
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(vars.clone())),
            );

        for (env_key, config_key) in LEGACY_ENV_KEYS {
            let value = vars
                .get(env_key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            builder = builder.set_override_option(config_key, value)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!("配置加载完成: {:?}", config);
        Ok(config)
    }

    /// 启动前校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.door_code.is_empty() {
            return Err(ConfigError::Message("auth.door_code 不能为空".to_string()));
        }
        if self.auth.admin_password.is_empty() {
            return Err(ConfigError::Message(
                "auth.admin_password 不能为空".to_string(),
            ));
        }
        if self.store.table.trim().is_empty() {
            return Err(ConfigError::Message("store.table 不能为空".to_string()));
        }
        if self.store.backend == StoreBackend::Supabase {
            if self.store.url.trim().is_empty() {
                return Err(ConfigError::Message(
                    "store.url (SUPABASE_URL) 未配置".to_string(),
                ));
            }
            if self.store.service_key.trim().is_empty() {
                return Err(ConfigError::Message(
                    "store.service_key (SUPABASE_SERVICE_KEY) 未配置".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// 获取服务器监听地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取静态资源目录
    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.static_files.dir)
    }
}
