use chrono::{NaiveTime, Utc};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::EntryPoint;

pub struct Script;

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        let find_employee = Query::select()
            .column(Employees::Id)
            .from(Employees::Table)
            .and_where(Expr::col(Employees::EmployeeNumber).eq("EMP001"))
            .limit(1)
            .to_owned();

        let Some(row) = db.query_one_raw(backend.build(&find_employee)).await? else {
            tracing::warn!("Employee EMP001 not found, skipping attendance seed");
            return Ok(());
        };
        let employee_id: i32 = row.try_get("", "id")?;
        let now = Utc::now();
        let today = now.date_naive();

        let exists = Query::select()
            .column(Attendances::Id)
            .from(Attendances::Table)
            .and_where(Expr::col(Attendances::EmployeeId).eq(employee_id))
            .and_where(Expr::col(Attendances::Date).eq(today))
            .limit(1)
            .to_owned();

        if db.query_one_raw(backend.build(&exists)).await?.is_some() {
            tracing::info!("Skipped attendance for EMP001 on {} (exists)", today);
            return Ok(());
        }

        let check_in = NaiveTime::from_hms_opt(8, 0, 0)
            .ok_or_else(|| DbErr::Custom("invalid check-in time".into()))?;
        let insert = Query::insert()
            .into_table(Attendances::Table)
            .columns([
                Attendances::EmployeeId,
                Attendances::Date,
                Attendances::CheckInTime,
                Attendances::Status,
                Attendances::CreatedAt,
                Attendances::UpdatedAt,
            ])
            .values_panic([
                employee_id.into(),
                today.into(),
                check_in.into(),
                "hadir".into(),
                now.into(),
                now.into(),
            ])
            .to_owned();
        manager.exec_stmt(insert).await?;

        tracing::info!("Inserted attendance for EMP001 on {}", today);
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    EmployeeNumber,
}

#[derive(DeriveIden)]
enum Attendances {
    Table,
    Id,
    EmployeeId,
    Date,
    CheckInTime,
    Status,
    CreatedAt,
    UpdatedAt,
}
