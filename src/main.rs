use qr_checkin::{AppConfig, AppState, app, logging, server, startup};

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

    startup::run_startup_checks(&config);

    let state = match AppState::from_config(config.clone()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Store init failed: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Store: {} (table `{}`)",
        state.store.backend_name(),
        config.store.table
    );
    tracing::info!("Static pages: {:?}", config.public_dir());

    let app = app::build_router(state);
    if let Err(e) = server::serve(app, &config, "Check-in server").await {
        tracing::error!("服务器运行错误: {}", e);
        std::process::exit(1);
    }
}
