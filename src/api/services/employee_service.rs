use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;
use crate::storage::entities::employees;
use crate::storage::{EmployeeChanges, EmployeeRepository, NewEmployee, SeaOrmBackend};

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: i32,
    pub resident_id: Option<i32>,
    pub employee_number: String,
    pub name: String,
    pub position: Option<String>,
    pub region_id: Option<i32>,
    pub is_active: bool,
    pub user_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<employees::Model> for EmployeeResponse {
    fn from(e: employees::Model) -> Self {
        Self {
            id: e.id,
            resident_id: e.resident_id,
            employee_number: e.employee_number,
            name: e.name,
            position: e.position,
            region_id: e.region_id,
            is_active: e.is_active,
            user_id: e.user_id,
            created_at: e.created_at.to_rfc3339(),
            updated_at: e.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub employee_number: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub resident_id: Option<i32>,
    pub region_id: Option<i32>,
    pub is_active: Option<bool>,
    pub user_id: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateEmployeeRequest {
    pub employee_number: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub resident_id: Option<i32>,
    pub region_id: Option<i32>,
    pub is_active: Option<bool>,
    pub user_id: Option<i32>,
}

/// 必填字段去除首尾空白后不能为空
fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))
}

/// 提供时不能为空
fn non_empty(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match value {
        Some(v) => required(Some(v), field).map(Some),
        None => Ok(None),
    }
}

/// GET /employees
pub async fn list_employees(
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let list = storage.list_employees().await?;
    let response: Vec<EmployeeResponse> = list.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /employees/{id}
pub async fn get_employee(
    id: web::Path<i32>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let employee = storage
        .find_employee(id.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

/// GET /employees/user/{user_id}
pub async fn get_employee_by_user(
    user_id: web::Path<i32>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let employee = storage
        .find_employee_by_user(user_id.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

/// POST /employees
pub async fn create_employee(
    body: web::Json<CreateEmployeeRequest>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new = NewEmployee {
        employee_number: required(body.employee_number, "employee_number")?,
        name: required(body.name, "name")?,
        position: body.position,
        resident_id: body.resident_id,
        region_id: body.region_id,
        is_active: body.is_active,
        user_id: body.user_id,
    };

    let employee = storage.create_employee(new).await?;
    Ok(HttpResponse::Created().json(EmployeeResponse::from(employee)))
}

/// PUT /employees/{id}
pub async fn update_employee(
    id: web::Path<i32>,
    body: web::Json<UpdateEmployeeRequest>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let changes = EmployeeChanges {
        employee_number: non_empty(body.employee_number, "employee_number")?,
        name: non_empty(body.name, "name")?,
        position: body.position,
        resident_id: body.resident_id,
        region_id: body.region_id,
        is_active: body.is_active,
        user_id: body.user_id,
    };

    let employee = storage.update_employee(id.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    id: web::Path<i32>,
    storage: web::Data<Arc<SeaOrmBackend>>,
) -> Result<HttpResponse, AppError> {
    storage.delete_employee(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
