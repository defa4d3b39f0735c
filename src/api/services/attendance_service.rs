use actix_web::{HttpResponse, web};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;
use crate::storage::entities::attendances;
use crate::storage::{AttendanceChanges, AttendanceRepository, NewAttendance, SeaOrmBackend};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub id: i32,
    pub employee_id: i32,
    pub date: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<attendances::Model> for AttendanceResponse {
    fn from(a: attendances::Model) -> Self {
        Self {
            id: a.id,
            employee_id: a.employee_id,
            date: a.date.format(DATE_FORMAT).to_string(),
            check_in_time: a.check_in_time.map(|t| t.format(TIME_FORMAT).to_string()),
            check_out_time: a.check_out_time.map(|t| t.format(TIME_FORMAT).to_string()),
            status: a.status,
            description: a.description,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAttendanceRequest {
    pub employee_id: Option<i32>,
    pub date: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateAttendanceRequest {
    pub employee_id: Option<i32>,
    pub date: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClockRequest {
    pub employee_id: Option<i32>,
    /// RFC 3339 时间戳，缺省为当前时间
    pub time: Option<String>,
}

/// 解析 YYYY-MM-DD
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("invalid date '{}', expected YYYY-MM-DD", value)))
}

/// 解析 HH:MM、HH:MM:SS 或 RFC 3339 时间戳（按考勤时区取时刻）
pub(crate) fn parse_time(value: &str, offset: FixedOffset) -> Result<NaiveTime, AppError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .or_else(|_| {
            DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&offset).time())
        })
        .map_err(|_| {
            AppError::BadRequest(format!(
                "invalid time '{}', expected HH:MM[:SS] or RFC 3339",
                value
            ))
        })
}

/// 解析打卡时刻，缺省为当前时间
pub(crate) fn parse_instant(value: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    match value {
        Some(v) => DateTime::parse_from_rfc3339(v.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| AppError::BadRequest(format!("invalid time '{}', expected RFC 3339", v))),
        None => Ok(Utc::now()),
    }
}

fn parse_optional_time(
    value: Option<String>,
    offset: FixedOffset,
) -> Result<Option<NaiveTime>, AppError> {
    value.as_deref().map(|v| parse_time(v, offset)).transpose()
}

/// GET /attendances
pub async fn list_attendances(
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let list = storage.list_attendances().await?;
    let response: Vec<AttendanceResponse> = list.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /attendances/employee/{employee_id}
pub async fn list_by_employee(
    employee_id: web::Path<i32>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let list = storage
        .list_attendances_by_employee(employee_id.into_inner())
        .await?;
    let response: Vec<AttendanceResponse> = list.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /attendances/{id}
pub async fn get_attendance(
    id: web::Path<i32>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let record = storage
        .find_attendance(id.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(AttendanceResponse::from(record)))
}

/// POST /attendances
pub async fn create_attendance(
    body: web::Json<CreateAttendanceRequest>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let offset = storage.offset();

    let employee_id = body
        .employee_id
        .ok_or_else(|| AppError::BadRequest("employee_id is required".into()))?;
    let date = body
        .date
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("date is required".into()))
        .and_then(parse_date)?;

    let new = NewAttendance {
        employee_id,
        date,
        check_in_time: parse_optional_time(body.check_in_time, offset)?,
        check_out_time: parse_optional_time(body.check_out_time, offset)?,
        status: body.status,
        description: body.description,
    };

    let record = storage.create_attendance(new).await?;
    Ok(HttpResponse::Created().json(AttendanceResponse::from(record)))
}

/// POST /attendances/clock-in
#[tracing_attributes::instrument(skip_all, fields(employee_id = ?body.employee_id))]
pub async fn clock_in(
    body: web::Json<ClockRequest>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let employee_id = body
        .employee_id
        .ok_or_else(|| AppError::BadRequest("employee_id is required".into()))?;
    let at = parse_instant(body.time.as_deref())?;

    let record = storage.clock_in(employee_id, at).await?;
    Ok(HttpResponse::Ok().json(AttendanceResponse::from(record)))
}

/// POST /attendances/clock-out
#[tracing_attributes::instrument(skip_all, fields(employee_id = ?body.employee_id))]
pub async fn clock_out(
    body: web::Json<ClockRequest>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let employee_id = body
        .employee_id
        .ok_or_else(|| AppError::BadRequest("employee_id is required".into()))?;
    let at = parse_instant(body.time.as_deref())?;

    let record = storage.clock_out(employee_id, at).await?;
    Ok(HttpResponse::Ok().json(AttendanceResponse::from(record)))
}

/// PUT /attendances/{id}
pub async fn update_attendance(
    id: web::Path<i32>,
    body: web::Json<UpdateAttendanceRequest>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let offset = storage.offset();

    let changes = AttendanceChanges {
        employee_id: body.employee_id,
        date: body.date.as_deref().map(parse_date).transpose()?,
        check_in_time: parse_optional_time(body.check_in_time, offset)?,
        check_out_time: parse_optional_time(body.check_out_time, offset)?,
        status: body.status,
        description: body.description,
    };

    let record = storage.update_attendance(id.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(AttendanceResponse::from(record)))
}

/// DELETE /attendances/{id}
pub async fn delete_attendance(
    id: web::Path<i32>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    storage.delete_attendance(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
