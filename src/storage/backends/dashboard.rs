use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;

use crate::errors::AppError;
use crate::storage::entities::{prelude::*, *};
use crate::storage::repository::*;

use super::super::backend::SeaOrmBackend;

/// 状态为空的记录归入此分组
const UNKNOWN_STATUS: &str = "unknown";

#[async_trait]
impl DashboardRepository for SeaOrmBackend {
    async fn count_employees(&self) -> Result<u64, AppError> {
        let total = Employees::find().count(self.db.as_ref()).await?;
        Ok(total)
    }

    async fn attendance_summary(&self, date: NaiveDate) -> Result<AttendanceSummary, AppError> {
        let rows: Vec<(Option<String>, i64)> = Attendances::find()
            .select_only()
            .column(attendances::Column::Status)
            .column_as(
                Expr::expr(Func::count(Expr::col(attendances::Column::Id))),
                "count",
            )
            .filter(attendances::Column::Date.eq(date))
            .group_by(attendances::Column::Status)
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        let mut by_status = BTreeMap::new();
        let mut total = 0;
        for (status, count) in rows {
            let count = u64::try_from(count).unwrap_or(0);
            let key = status.unwrap_or_else(|| UNKNOWN_STATUS.to_string());
            *by_status.entry(key).or_insert(0) += count;
            total += count;
        }

        Ok(AttendanceSummary {
            date,
            total,
            by_status,
        })
    }
}
