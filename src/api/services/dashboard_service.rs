use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::attendance_service::parse_date;
use crate::errors::AppError;
use crate::storage::{DashboardRepository, SeaOrmBackend};

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub date: Option<String>,
}

/// GET /dashboard/total-employees
pub async fn total_employees(
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let total = storage.count_employees().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "totalEmployees": total })))
}

/// GET /dashboard/attendance?date=YYYY-MM-DD
/// 缺省为考勤时区的当天
pub async fn attendance_summary(
    query: web::Query<SummaryQuery>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let date = match query.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => storage.local_date(Utc::now()),
    };

    let summary = storage.attendance_summary(date).await?;
    Ok(HttpResponse::Ok().json(summary))
}
