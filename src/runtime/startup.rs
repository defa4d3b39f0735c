use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::storage::{SeaOrmBackend, connect, run_migrations};

/// 服务器启动上下文
pub struct StartupContext {
    pub db: Arc<DatabaseConnection>,
    pub storage: Arc<SeaOrmBackend>,
}

/// 初始化服务器：连接数据库并按配置执行待处理脚本
pub async fn prepare_server(config: &AppConfig) -> Result<StartupContext, AppError> {
    tracing::info!("Attendance service v{} starting...", env!("CARGO_PKG_VERSION"));

    // 1. 初始化数据库
    tracing::info!("Connecting to database: {}", config.database.url);
    let db = connect(&config.database).await?;
    tracing::info!("Database connected");

    // 2. 运行表结构和数据脚本
    if config.migration.auto_migrate {
        tracing::info!("Running pending schema and seed scripts...");
        let report = run_migrations(&db, &config.migration).await?;
        if !report.is_up_to_date() {
            tracing::info!(
                batch = report.batch,
                count = report.executed_count(),
                "Applied pending scripts"
            );
        }
    } else {
        tracing::info!("Auto-migration disabled, skipping scripts");
    }

    // 3. 考勤时区
    let offset = config.attendance.utc_offset()?;
    let db = Arc::new(db);
    let storage = Arc::new(SeaOrmBackend::with_offset(db.clone(), offset));
    tracing::info!("Attendance clock offset: {}", offset);

    tracing::info!("Server initialization complete");

    Ok(StartupContext { db, storage })
}
