use sea_orm_migration::{prelude::*, schema::*};

use crate::EntryPoint;

pub struct Script;

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(pk_auto(Employees::Id))
                    .col(integer_null(Employees::ResidentId))
                    .col(string_len_uniq(Employees::EmployeeNumber, 30))
                    .col(string_len(Employees::Name, 100))
                    .col(string_len_null(Employees::Position, 100))
                    .col(integer_null(Employees::RegionId))
                    .col(boolean(Employees::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Employees::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Employees::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        tracing::info!("employees table created/verified");
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    ResidentId,
    EmployeeNumber,
    Name,
    Position,
    RegionId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
