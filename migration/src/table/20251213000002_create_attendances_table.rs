use sea_orm_migration::{prelude::*, schema::*};

use crate::EntryPoint;

pub struct Script;

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendances::Id))
                    .col(integer(Attendances::EmployeeId))
                    .col(date(Attendances::Date))
                    .col(time_null(Attendances::CheckInTime))
                    .col(time_null(Attendances::CheckOutTime))
                    .col(string_len_null(Attendances::Status, 20))
                    .col(text_null(Attendances::Description))
                    .col(
                        timestamp_with_time_zone(Attendances::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Attendances::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendances::Table, Attendances::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 打卡按 (员工, 日期) 查找
        manager
            .create_index(
                Index::create()
                    .name("idx_attendances_employee_date")
                    .table(Attendances::Table)
                    .col(Attendances::EmployeeId)
                    .col(Attendances::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        tracing::info!("attendances table created/verified");
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Attendances {
    Table,
    Id,
    EmployeeId,
    Date,
    CheckInTime,
    CheckOutTime,
    Status,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}
