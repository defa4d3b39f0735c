use sea_orm_migration::{prelude::*, schema::*};

use crate::EntryPoint;

pub struct Script;

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.has_column("employees", "user_id").await? {
            tracing::info!("employees.user_id already exists, skipping");
            return Ok(());
        }

        // SQLite 不支持 ALTER TABLE 直接添加 UNIQUE 列，唯一约束用索引实现
        manager
            .alter_table(
                Table::alter()
                    .table(Employees::Table)
                    .add_column(integer_null(Employees::UserId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_user_id")
                    .table(Employees::Table)
                    .col(Employees::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        tracing::info!("Added user_id column to employees table");
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    UserId,
}
