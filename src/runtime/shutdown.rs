use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// 等待关闭信号（Ctrl+C，Unix 下还包括 SIGTERM）
pub async fn listen_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("无法监听 Ctrl+C 信号: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("无法监听 SIGTERM 信号: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    warn!("收到关闭信号，正在执行清理操作...");
}

/// 关闭数据库连接，仍有其他引用时跳过
pub async fn release_database(db: Arc<DatabaseConnection>) {
    match Arc::try_unwrap(db) {
        Ok(db) => match db.close().await {
            Ok(()) => info!("数据库连接已关闭"),
            Err(e) => warn!("关闭数据库连接失败: {}", e),
        },
        Err(_) => warn!("数据库连接仍被引用，跳过关闭"),
    }
}
