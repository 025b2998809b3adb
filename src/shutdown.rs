//! 优雅退出
//!
//! 监听 Ctrl+C 与 SIGTERM；触发后交给 axum 停止接收新连接，
//! 并在超时后强制结束进程，避免卡住的连接阻塞退出。

use std::time::Duration;

/// 退出原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// 用户中断信号 (Ctrl+C)
    Interrupt,
    /// 终止信号 (SIGTERM)
    Terminate,
}

/// 等待退出信号
pub async fn wait_for_signal() -> ShutdownReason {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("监听 Ctrl+C 失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!("监听 SIGTERM 失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => ShutdownReason::Interrupt,
        _ = terminate => ShutdownReason::Terminate,
    }
}

/// 供 `axum::serve(..).with_graceful_shutdown` 使用的退出信号
///
/// 信号到达后启动一个计时任务：超过 `grace` 仍未退出则强制结束进程。
pub async fn graceful_signal(grace: Duration) {
    let reason = wait_for_signal().await;
    tracing::info!("接收到退出信号: {:?}，开始优雅退出（最长 {}s）", reason, grace.as_secs());

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::warn!("优雅退出超时，强制退出");
        std::process::exit(1);
    });
}
