use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::entities::{attendances, employees};
use crate::errors::AppError;

/// 新建员工
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub employee_number: String,
    pub name: String,
    pub position: Option<String>,
    pub resident_id: Option<i32>,
    pub region_id: Option<i32>,
    pub is_active: Option<bool>,
    pub user_id: Option<i32>,
}

/// 员工部分更新，None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub employee_number: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub resident_id: Option<i32>,
    pub region_id: Option<i32>,
    pub is_active: Option<bool>,
    pub user_id: Option<i32>,
}

/// 新建考勤记录
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub employee_id: i32,
    pub date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: Option<String>,
    pub description: Option<String>,
}

/// 考勤部分更新，None 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct AttendanceChanges {
    pub employee_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: Option<String>,
    pub description: Option<String>,
}

/// 某日考勤汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub date: NaiveDate,
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
}

/// 员工仓储
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<employees::Model>, AppError>;
    async fn find_employee(&self, id: i32) -> Result<Option<employees::Model>, AppError>;
    async fn find_employee_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<employees::Model>, AppError>;
    async fn create_employee(&self, new: NewEmployee) -> Result<employees::Model, AppError>;
    async fn update_employee(
        &self,
        id: i32,
        changes: EmployeeChanges,
    ) -> Result<employees::Model, AppError>;
    async fn delete_employee(&self, id: i32) -> Result<(), AppError>;
}

/// 考勤仓储
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn list_attendances(&self) -> Result<Vec<attendances::Model>, AppError>;
    async fn list_attendances_by_employee(
        &self,
        employee_id: i32,
    ) -> Result<Vec<attendances::Model>, AppError>;
    async fn find_attendance(&self, id: i32) -> Result<Option<attendances::Model>, AppError>;
    async fn create_attendance(&self, new: NewAttendance)
    -> Result<attendances::Model, AppError>;
    async fn update_attendance(
        &self,
        id: i32,
        changes: AttendanceChanges,
    ) -> Result<attendances::Model, AppError>;
    async fn delete_attendance(&self, id: i32) -> Result<(), AppError>;

    /// 上班打卡，按配置的时区偏移计算日期和时间
    async fn clock_in(
        &self,
        employee_id: i32,
        at: DateTime<Utc>,
    ) -> Result<attendances::Model, AppError>;

    /// 下班打卡，必须已有当日记录
    async fn clock_out(
        &self,
        employee_id: i32,
        at: DateTime<Utc>,
    ) -> Result<attendances::Model, AppError>;
}

/// 仪表盘统计
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn count_employees(&self) -> Result<u64, AppError>;
    async fn attendance_summary(&self, date: NaiveDate) -> Result<AttendanceSummary, AppError>;
}
