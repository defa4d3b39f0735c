//! 迁移记录表（`_migrations`）访问
//!
//! 记录每个已成功执行的脚本文件名、批次号和执行时间。
//! 所有读写都通过 sea-query 构建并绑定参数。

use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection, SqlErr};

use crate::error::MigrationError;

pub const LEDGER_TABLE: &str = "_migrations";

#[derive(DeriveIden)]
enum Migrations {
    #[sea_orm(iden = "_migrations")]
    Table,
    Id,
    Name,
    Batch,
    CreatedAt,
}

/// 记录表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: i32,
    pub name: String,
    pub batch: i32,
}

pub struct Ledger<'c> {
    db: &'c DatabaseConnection,
}

impl<'c> Ledger<'c> {
    pub fn new(db: &'c DatabaseConnection) -> Self {
        Self { db }
    }

    /// 记录表是否存在（当前 schema 下）
    pub async fn table_exists(&self) -> Result<bool, MigrationError> {
        SchemaManager::new(self.db)
            .has_table(LEDGER_TABLE)
            .await
            .map_err(MigrationError::Ledger)
    }

    pub async fn create_table(&self) -> Result<(), MigrationError> {
        SchemaManager::new(self.db)
            .create_table(
                Table::create()
                    .table(Migrations::Table)
                    .if_not_exists()
                    .col(pk_auto(Migrations::Id))
                    .col(string_uniq(Migrations::Name))
                    .col(integer(Migrations::Batch))
                    .col(timestamp(Migrations::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
            .map_err(MigrationError::Ledger)
    }

    /// 表不存在时创建，返回是否新建
    pub async fn ensure_table(&self) -> Result<bool, MigrationError> {
        if self.table_exists().await? {
            return Ok(false);
        }
        self.create_table().await?;
        tracing::info!("Created {} tracking table", LEDGER_TABLE);
        Ok(true)
    }

    /// 当前最大批次号，记录表为空时返回 None
    pub async fn latest_batch(&self) -> Result<Option<i32>, MigrationError> {
        let select = Query::select()
            .expr_as(
                Func::max(Expr::col(Migrations::Batch)),
                Alias::new("max_batch"),
            )
            .from(Migrations::Table)
            .to_owned();

        let backend = self.db.get_database_backend();
        let row = self
            .db
            .query_one_raw(backend.build(&select))
            .await
            .map_err(MigrationError::Ledger)?;

        match row {
            Some(row) => row
                .try_get::<Option<i32>>("", "max_batch")
                .map_err(MigrationError::Ledger),
            None => Ok(None),
        }
    }

    /// 下一个批次号 = 最大批次号 + 1，空表为 1
    pub async fn next_batch(&self) -> Result<i32, MigrationError> {
        Ok(self.latest_batch().await?.map_or(1, |batch| batch + 1))
    }

    /// 已执行的脚本名，按执行时间排序
    pub async fn applied_names(&self) -> Result<Vec<String>, MigrationError> {
        let select = Query::select()
            .column(Migrations::Name)
            .from(Migrations::Table)
            .order_by(Migrations::CreatedAt, Order::Asc)
            .order_by(Migrations::Id, Order::Asc)
            .to_owned();

        let backend = self.db.get_database_backend();
        let rows = self
            .db
            .query_all_raw(backend.build(&select))
            .await
            .map_err(MigrationError::Ledger)?;

        rows.iter()
            .map(|row| row.try_get::<String>("", "name"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(MigrationError::Ledger)
    }

    pub async fn entries(&self) -> Result<Vec<LedgerEntry>, MigrationError> {
        let select = Query::select()
            .columns([Migrations::Id, Migrations::Name, Migrations::Batch])
            .from(Migrations::Table)
            .order_by(Migrations::Id, Order::Asc)
            .to_owned();

        let backend = self.db.get_database_backend();
        let rows = self
            .db
            .query_all_raw(backend.build(&select))
            .await
            .map_err(MigrationError::Ledger)?;

        rows.iter()
            .map(|row| {
                Ok(LedgerEntry {
                    id: row.try_get("", "id")?,
                    name: row.try_get("", "name")?,
                    batch: row.try_get("", "batch")?,
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()
            .map_err(MigrationError::Ledger)
    }

    /// 写入执行记录，同名记录已存在时报错
    pub async fn record(&self, name: &str, batch: i32) -> Result<(), MigrationError> {
        let insert = Query::insert()
            .into_table(Migrations::Table)
            .columns([Migrations::Name, Migrations::Batch])
            .values_panic([name.into(), batch.into()])
            .to_owned();

        let backend = self.db.get_database_backend();
        match self.db.execute_raw(backend.build(&insert)).await {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(MigrationError::DuplicateEntry {
                    name: name.to_string(),
                }),
                _ => Err(MigrationError::Ledger(e)),
            },
        }
    }
}
