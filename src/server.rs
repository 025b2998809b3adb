use axum::Router;

use crate::config::AppConfig;
use crate::shutdown;
use crate::startup::advertised_urls;

/// 绑定端口并运行到收到退出信号
pub async fn serve(app: Router, config: &AppConfig, name: &str) -> std::io::Result<()> {
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("{} running on http://{}", name, addr);
    for url in advertised_urls(config.server.port) {
        tracing::info!(" -> {}", url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::graceful_signal(
            config.shutdown.timeout_duration(),
        ))
        .await?;

    tracing::info!("服务器已优雅关闭");
    Ok(())
}
