//! 脚本命名约定与入口定义
//!
//! 文件名格式: `{YYYYMMDDHHMMSS}_{slug}.rs`
//! 固定宽度的时间戳保证按文件名字典序排序即为执行顺序。

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use sea_orm_migration::prelude::*;

use crate::error::MigrationError;

/// 脚本文件扩展名
pub const SCRIPT_EXTENSION: &str = "rs";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_WIDTH: usize = 14;

/// 脚本类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScriptKind {
    /// 表结构变更，存放在 `table/`
    Schema,
    /// 数据填充，存放在 `seed/`
    Seed,
}

impl ScriptKind {
    /// 执行顺序: 先表结构，后数据
    pub const ALL: [ScriptKind; 2] = [ScriptKind::Schema, ScriptKind::Seed];

    /// 对应的目录名
    pub fn dir_name(self) -> &'static str {
        match self {
            ScriptKind::Schema => "table",
            ScriptKind::Seed => "seed",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScriptKind::Schema => "schema",
            ScriptKind::Seed => "seed",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptKind {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "schema" | "migration" => Ok(ScriptKind::Schema),
            "seed" => Ok(ScriptKind::Seed),
            other => Err(MigrationError::Validation(format!(
                "unknown script kind '{}', expected schema or seed",
                other
            ))),
        }
    }
}

/// 脚本唯一入口
///
/// 每个脚本文件导出一个实现该 trait 的 `Script` 结构体。入口需自身保证幂等，
/// 执行失败时引擎不会回滚已生效的部分变更。
#[async_trait::async_trait]
pub trait EntryPoint: Send + Sync {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr>;
}

/// 生成秒级时间戳 `YYYYMMDDHHMMSS`
pub fn timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// 将名称规范化为 slug
///
/// 小写，连续空白替换为 `_`，移除 `[a-z0-9_]` 之外的字符。
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            slug.push(ch);
        }
    }

    slug
}

/// 组合脚本文件名
pub fn script_filename(timestamp: &str, slug: &str) -> String {
    format!("{}_{}.{}", timestamp, slug, SCRIPT_EXTENSION)
}

/// 判断文件名是否符合 `^\d{14}_[a-z0-9_]+\.rs$`
pub fn is_script_filename(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(SCRIPT_EXTENSION).and_then(|s| s.strip_suffix('.')) else {
        return false;
    };
    if stem.len() <= TIMESTAMP_WIDTH + 1 {
        return false;
    }

    let (digits, rest) = stem.split_at(TIMESTAMP_WIDTH);
    let Some(slug) = rest.strip_prefix('_') else {
        return false;
    };

    digits.bytes().all(|b| b.is_ascii_digit())
        && !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}
