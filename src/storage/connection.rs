use migration::{Catalog, DirectoryStore, MigrationEngine, RunReport, ScriptSource};
use sea_orm::sqlx::SqlitePool;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use std::str::FromStr;
use std::time::Duration;

use crate::config::{DatabaseConfig, MigrationConfig};
use crate::errors::AppError;

/// 连接 SQLite 数据库（带自动创建和性能优化）
pub async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let opt = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Internal(format!("SQLite URL 解析失败: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .pragma("cache_size", "-64000") // 64MB cache
        .pragma("temp_store", "memory");

    let pool = SqlitePool::connect_with(opt)
        .await
        .map_err(|e| AppError::Internal(format!("无法连接到 SQLite 数据库: {}", e)))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 连接通用数据库（MySQL/PostgreSQL）
pub async fn connect_generic(
    database_url: &str,
    config: &DatabaseConfig,
) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(false);

    Ok(Database::connect(opt).await?)
}

/// 智能连接数据库（自动识别类型）
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, AppError> {
    if config.url.starts_with("sqlite://") || config.url.starts_with("sqlite:") {
        tracing::info!("使用 SQLite 数据库（已启用 WAL 和外键约束）");
        connect_sqlite(&config.url).await
    } else if config.url.starts_with("postgres://") || config.url.starts_with("postgresql://") {
        tracing::info!("使用 PostgreSQL 数据库");
        connect_generic(&config.url, config).await
    } else if config.url.starts_with("mysql://") {
        tracing::info!("使用 MySQL 数据库");
        connect_generic(&config.url, config).await
    } else {
        Err(AppError::Config(format!(
            "不支持的数据库类型: {}",
            config.url
        )))
    }
}

/// 按配置选择脚本来源：默认使用编译进程序的清单，开发时可改为以磁盘文件为准
pub fn migration_engine(config: &MigrationConfig) -> MigrationEngine<Box<dyn ScriptSource>> {
    let catalog: Catalog = migration::manifest();
    let source: Box<dyn ScriptSource> = if config.list_from_disk {
        tracing::info!("Listing scripts from {}", config.scripts_dir);
        Box::new(DirectoryStore::new(&config.scripts_dir, catalog))
    } else {
        Box::new(catalog)
    };
    MigrationEngine::new(source)
}

/// 在共享连接上执行待处理的表结构和数据脚本
pub async fn run_migrations(
    db: &DatabaseConnection,
    config: &MigrationConfig,
) -> Result<RunReport, AppError> {
    let report = migration_engine(config).run(db).await?;

    tracing::info!("✓ Database migrations completed");
    Ok(report)
}
