use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时使用 `logging.level` 作为本 crate 的级别。
pub fn init(cfg: &LoggingConfig) {
    let fallback = format!("qr_checkin={},tower_http=info", cfg.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if cfg.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        tracing::debug!("日志已初始化，跳过: {}", e);
    }
}
