use attendance_service::AppError;
use attendance_service::config::args::{Cli, Command};
use attendance_service::config::{AppConfig, get_config_path, init_config};
use attendance_service::runtime::{
    build_server, listen_for_shutdown, make_script, prepare_server, release_database, run_migrate,
};
use attendance_service::system::{init_logging, install_panic_hook};
use clap::Parser;
use std::process::ExitCode;

#[actix_web::main]
async fn main() -> ExitCode {
    // 安装 panic hook
    install_panic_hook();

    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化全局配置
    let config = init_config(cli.config.clone());
    if let Err(e) = config.validate() {
        eprintln!("{}", e.format_colored());
        return ExitCode::FAILURE;
    }

    // 初始化日志，guard 在 main 返回前释放
    let log_guard = init_logging(&config.log);
    if let Some(path) = get_config_path() {
        tracing::debug!("Using config file: {}", path);
    }

    let result = match cli.resolved_command() {
        Command::Serve => serve(config).await,
        Command::Migrate => run_migrate(config).await.map(|_| ()),
        Command::MakeScript(args) => make_script(&config.migration, &args).map(|_| ()),
    };

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e.format_simple());
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    };

    drop(log_guard);
    code
}

/// 启动 HTTP 服务，直到收到关闭信号
async fn serve(config: &AppConfig) -> Result<(), AppError> {
    let ctx = prepare_server(config).await?;
    let server = build_server(&ctx, &config.server)
        .map_err(|e| AppError::Internal(format!("Failed to bind server: {}", e)))?;
    let handle = server.handle();

    tracing::info!("Attendance service is ready");

    let server_task = actix_web::rt::spawn(server);
    tokio::select! {
        result = server_task => {
            let result = result.map_err(|e| AppError::Internal(format!("Server task failed: {}", e)))?;
            result.map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;
        }
        _ = listen_for_shutdown() => {
            tracing::info!("收到关闭信号，正在停止服务器...");
            handle.stop(true).await;
        }
    }

    // 释放服务器持有的状态后关闭数据库
    let db = ctx.db.clone();
    drop(ctx);
    release_database(db).await;

    tracing::info!("Server stopped");
    Ok(())
}
