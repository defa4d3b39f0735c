use chrono::Utc;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::EntryPoint;

pub struct Script;

const EMPLOYEES: [(&str, &str, &str); 3] = [
    ("EMP001", "Budi Santoso", "Manager"),
    ("EMP002", "Siti Aminah", "Staff"),
    ("EMP003", "Joko Anwar", "Staff"),
];

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();

        let now = Utc::now();

        for (number, name, position) in EMPLOYEES {
            let exists = Query::select()
                .column(Employees::Id)
                .from(Employees::Table)
                .and_where(Expr::col(Employees::EmployeeNumber).eq(number))
                .limit(1)
                .to_owned();

            if db.query_one_raw(backend.build(&exists)).await?.is_some() {
                tracing::info!("Skipped employee {} (exists)", name);
                continue;
            }

            let insert = Query::insert()
                .into_table(Employees::Table)
                .columns([
                    Employees::EmployeeNumber,
                    Employees::Name,
                    Employees::Position,
                    Employees::CreatedAt,
                    Employees::UpdatedAt,
                ])
                .values_panic([
                    number.into(),
                    name.into(),
                    position.into(),
                    now.into(),
                    now.into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;
            tracing::info!("Inserted employee {}", name);
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    EmployeeNumber,
    Name,
    Position,
    CreatedAt,
    UpdatedAt,
}
