use sea_orm_migration::prelude::*;

use crate::EntryPoint;

pub struct Script;

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 现有员工的 user_id 默认与员工 id 相同
        let update = Query::update()
            .table(Employees::Table)
            .value(Employees::UserId, Expr::col(Employees::Id))
            .and_where(Expr::col(Employees::UserId).is_null())
            .to_owned();
        manager.exec_stmt(update).await?;

        tracing::info!("Backfilled user_id for existing employees");
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    UserId,
}
