//! Panic handler module
//!
//! 服务和命令行共用：终端显示彩色堆栈跟踪，同时追加到 crash.log

use chrono::Utc;
use std::any::Any;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};

/// 默认崩溃日志文件
pub const CRASH_LOG: &str = "crash.log";

/// 安装自定义 panic hook，崩溃信息写入默认的 crash.log
pub fn install_panic_hook() {
    install_panic_hook_with(CRASH_LOG);
}

/// 安装自定义 panic hook，崩溃信息写入指定文件
pub fn install_panic_hook_with(crash_log: impl Into<PathBuf>) {
    let crash_log = crash_log.into();

    panic::set_hook(Box::new(move |panic_info| {
        let message = panic_message(panic_info.payload());
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "Unknown location".to_string());

        let backtrace = std::backtrace::Backtrace::force_capture();
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        let report = CrashReport {
            timestamp: &timestamp,
            message: &message,
            location: &location,
            backtrace: &backtrace,
        };

        if let Err(e) = report.append_to(&crash_log) {
            eprintln!("Failed to write crash log: {}", e);
        }

        report.display(&crash_log);
    }));
}

/// 提取 panic 载荷中的文本
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

struct CrashReport<'a> {
    timestamp: &'a str,
    message: &'a str,
    location: &'a str,
    backtrace: &'a std::backtrace::Backtrace,
}

impl CrashReport<'_> {
    /// 在终端显示彩色的崩溃信息
    fn display(&self, crash_log: &Path) {
        use colored::Colorize;

        let rule = "═══════════════════════════════════════════════════";
        eprintln!();
        eprintln!("{}", rule.red().bold());
        eprintln!("{}", "PANIC".red().bold());
        eprintln!("{}", rule.red().bold());
        eprintln!();
        eprintln!("{} {}", "原因:".yellow().bold(), self.message.white());
        eprintln!("{} {}", "位置:".yellow().bold(), self.location.white());
        eprintln!();
        eprintln!("{}", "堆栈跟踪:".yellow().bold());
        eprintln!("{}", format!("{:?}", self.backtrace).dimmed());
        eprintln!();
        eprintln!(
            "{}",
            format!("详细信息已保存到 {}", crash_log.display()).cyan()
        );
        eprintln!("{}", rule.red().bold());
        eprintln!();
    }

    /// 追加到崩溃日志
    fn append_to(&self, crash_log: &Path) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(crash_log)?;

        writeln!(file, "==========================================")?;
        writeln!(file, "Crash Report - {}", self.timestamp)?;
        writeln!(file, "==========================================")?;
        writeln!(file, "Message: {}", self.message)?;
        writeln!(file, "Location: {}", self.location)?;
        writeln!(file, "\nBacktrace:")?;
        writeln!(file, "{:?}", self.backtrace)?;
        writeln!(file, "==========================================\n")?;

        Ok(())
    }
}
