use colored::Colorize;
use migration::{RunReport, ScriptKind};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::storage::{connect, migration_engine};

/// `migrate` 子命令：独占连接执行一次完整运行，结束时关闭连接
pub async fn run_migrate(config: &AppConfig) -> Result<RunReport, AppError> {
    println!("{} {}", "[migrate]".cyan().bold(), config.database.url);

    let db = connect(&config.database).await?;
    let engine = migration_engine(&config.migration);
    let report = engine.run_and_close(db).await?;

    print_report(&report);
    Ok(report)
}

fn print_report(report: &RunReport) {
    for kind in ScriptKind::ALL {
        let names: Vec<_> = report
            .applied
            .iter()
            .filter(|script| script.kind == kind)
            .collect();
        if names.is_empty() {
            println!("  {} no pending scripts", format!("[{}]", kind).dimmed());
            continue;
        }
        for script in names {
            println!(
                "  {} {} {}",
                format!("[{}]", kind).dimmed(),
                "✓".green(),
                script.name
            );
        }
    }

    if report.is_up_to_date() {
        println!("{}", "Database is up to date".green());
    } else {
        println!(
            "{}",
            format!(
                "Applied {} script(s) in batch {}",
                report.executed_count(),
                report.batch
            )
            .green()
            .bold()
        );
    }
}
