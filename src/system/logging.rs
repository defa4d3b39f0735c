use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// 初始化日志
///
/// 返回的 guard 需要保持到进程退出，否则文件日志可能丢失尾部内容
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_writer, guard) = match open_log_file(config) {
        Ok(Some((writer, guard))) => (Some(writer), Some(guard)),
        Ok(None) => (None, None),
        Err(e) => {
            eprintln!("[WARN] 无法打开日志文件,仅输出到终端: {}", e);
            (None, None)
        }
    };

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .with(file_writer.map(|w| fmt::layer().json().with_writer(w).with_ansi(false)))
                .init();
        }
        _ => {
            // pretty format (default)
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .with(file_writer.map(|w| fmt::layer().with_writer(w).with_ansi(false)))
                .init();
        }
    }

    tracing::info!("Logging initialized with level: {}", config.level);
    if let Some(file) = &config.file {
        tracing::info!(file = %file, rotation = config.enable_rotation, "File logging enabled");
    }

    guard
}

/// 按配置打开滚动日志文件，未配置 file 时返回 None
fn open_log_file(
    config: &LogConfig,
) -> Result<Option<(NonBlocking, WorkerGuard)>, tracing_appender::rolling::InitError> {
    let Some(file) = config.file.as_deref() else {
        return Ok(None);
    };

    let (dir, prefix) = split_log_path(file);
    let rotation = if config.enable_rotation {
        Rotation::DAILY
    } else {
        Rotation::NEVER
    };

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(prefix);
    if config.enable_rotation && config.max_backups > 0 {
        builder = builder.max_log_files(config.max_backups as usize);
    }

    let appender = builder.build(dir)?;
    Ok(Some(tracing_appender::non_blocking(appender)))
}

/// 拆分为目录与文件名前缀，"app.log" 的目录为当前目录
fn split_log_path(file: &str) -> (&Path, String) {
    let path = Path::new(file);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attendance.log".to_string());
    (dir, prefix)
}
