//! 独立部署的管理员读取函数：只暴露 `GET /api/submissions?password=...`

use qr_checkin::{AppConfig, AppState, app, logging, server};

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            logging::init(&Default::default());
            tracing::error!("Config init failed: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.logging);

    let state = match AppState::from_config(config.clone()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Store init failed: {}", e);
            std::process::exit(1);
        }
    };

    let app = app::build_standalone_router(state);
    if let Err(e) = server::serve(app, &config, "Submissions function").await {
        tracing::error!("服务器运行错误: {}", e);
        std::process::exit(1);
    }
}
