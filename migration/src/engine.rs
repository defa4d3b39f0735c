//! 迁移执行引擎
//!
//! 一次运行的流程:
//! 1. 确保记录表存在
//! 2. 读取已执行脚本和下一个批次号
//! 3. 依次执行待处理的表结构脚本
//! 4. 表结构全部成功后，依次执行待处理的数据脚本
//! 5. 汇总执行数量和批次号
//!
//! 任一脚本失败立即中止整次运行，失败脚本不写入记录表，后续脚本不再执行。

use std::collections::HashSet;

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseConnection;

use crate::error::MigrationError;
use crate::ledger::Ledger;
use crate::script::ScriptKind;
use crate::source::ScriptSource;

/// 本次运行中成功执行的脚本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedScript {
    pub kind: ScriptKind,
    pub name: String,
}

/// 运行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub batch: i32,
    pub applied: Vec<AppliedScript>,
}

impl RunReport {
    pub fn executed_count(&self) -> usize {
        self.applied.len()
    }

    pub fn is_up_to_date(&self) -> bool {
        self.applied.is_empty()
    }
}

pub struct MigrationEngine<S> {
    source: S,
}

impl<S: ScriptSource> MigrationEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// 在外部持有的连接上执行一次完整运行，不关闭连接
    pub async fn run(&self, db: &DatabaseConnection) -> Result<RunReport, MigrationError> {
        let ledger = Ledger::new(db);

        tracing::info!("Initializing migration ledger...");
        ledger.ensure_table().await?;

        let applied: HashSet<String> = ledger.applied_names().await?.into_iter().collect();
        let batch = ledger.next_batch().await?;
        tracing::debug!(
            "{} script(s) already applied, next batch is {}",
            applied.len(),
            batch
        );

        let manager = SchemaManager::new(db);
        let mut report = RunReport {
            batch,
            applied: Vec::new(),
        };

        for kind in ScriptKind::ALL {
            let pending = self.pending(kind, &applied);
            if pending.is_empty() {
                tracing::info!("[{}] No pending scripts", kind);
                continue;
            }

            tracing::info!("[{}] Running {} pending script(s)...", kind, pending.len());
            for name in pending {
                self.apply(&ledger, &manager, kind, &name, batch).await?;
                report.applied.push(AppliedScript { kind, name });
            }
        }

        if report.is_up_to_date() {
            tracing::info!("Database is up to date");
        } else {
            tracing::info!(
                "Executed {} script(s) in batch {}",
                report.executed_count(),
                report.batch
            );
        }

        Ok(report)
    }

    /// 独占连接执行一次运行，无论成功与否都在结束时关闭连接
    pub async fn run_and_close(&self, db: DatabaseConnection) -> Result<RunReport, MigrationError> {
        let result = self.run(&db).await;

        if let Err(e) = db.close().await {
            tracing::warn!("Failed to close database connection: {}", e);
        }

        result
    }

    /// 某一类中尚未执行的脚本，按文件名升序
    pub fn pending(&self, kind: ScriptKind, applied: &HashSet<String>) -> Vec<String> {
        let mut names = self.source.list(kind);
        names.sort();
        names.retain(|name| !applied.contains(name));
        names
    }

    async fn apply(
        &self,
        ledger: &Ledger<'_>,
        manager: &SchemaManager<'_>,
        kind: ScriptKind,
        name: &str,
        batch: i32,
    ) -> Result<(), MigrationError> {
        let Some(entry) = self.source.resolve(kind, name) else {
            tracing::error!("[{}] {}: missing entry point", kind, name);
            return Err(MigrationError::MissingEntryPoint {
                kind,
                name: name.to_string(),
            });
        };

        if let Err(e) = entry.up(manager).await {
            tracing::error!("[{}] {}: execution failed: {}", kind, name, e);
            return Err(MigrationError::ScriptFailed {
                kind,
                name: name.to_string(),
                source: e,
            });
        }

        ledger.record(name, batch).await?;
        tracing::info!("[{}] {} applied", kind, name);
        Ok(())
    }
}
