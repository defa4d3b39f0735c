use std::path::PathBuf;

use sea_orm_migration::prelude::DbErr;
use thiserror::Error;

use crate::script::ScriptKind;

#[derive(Debug, Error)]
pub enum MigrationError {
    // 生成器输入错误
    #[error("Invalid input: {0}")]
    Validation(String),

    // 文件读写错误
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // 脚本执行错误
    #[error("{kind} script {name} has no registered entry point")]
    MissingEntryPoint { kind: ScriptKind, name: String },

    #[error("{kind} script {name} failed: {source}")]
    ScriptFailed {
        kind: ScriptKind,
        name: String,
        #[source]
        source: DbErr,
    },

    // 迁移记录表错误
    #[error("Ledger error: {0}")]
    Ledger(#[source] DbErr),

    #[error("Script {name} is already recorded in the ledger")]
    DuplicateEntry { name: String },
}

impl MigrationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrationError::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否属于脚本执行失败（缺少入口或入口报错）
    pub fn is_script_failure(&self) -> bool {
        matches!(
            self,
            MigrationError::MissingEntryPoint { .. } | MigrationError::ScriptFailed { .. }
        )
    }
}
