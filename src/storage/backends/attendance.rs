use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::errors::AppError;
use crate::storage::backend::{STATUS_CLOCKED_IN, STATUS_CLOCKED_OUT};
use crate::storage::entities::{prelude::*, *};
use crate::storage::repository::*;

use super::super::backend::SeaOrmBackend;

impl SeaOrmBackend {
    /// 员工必须存在
    async fn require_employee(&self, employee_id: i32) -> Result<employees::Model, AppError> {
        Employees::find_by_id(employee_id)
            .one(self.db.as_ref())
            .await?
            .ok_or(AppError::NotFound)
    }

    /// 查找员工某日的考勤记录
    async fn find_daily_record(
        &self,
        employee_id: i32,
        date: chrono::NaiveDate,
    ) -> Result<Option<attendances::Model>, AppError> {
        let record = Attendances::find()
            .filter(attendances::Column::EmployeeId.eq(employee_id))
            .filter(attendances::Column::Date.eq(date))
            .order_by_asc(attendances::Column::Id)
            .one(self.db.as_ref())
            .await?;
        Ok(record)
    }
}

#[async_trait]
impl AttendanceRepository for SeaOrmBackend {
    async fn list_attendances(&self) -> Result<Vec<attendances::Model>, AppError> {
        let list = Attendances::find()
            .order_by_asc(attendances::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(list)
    }

    async fn list_attendances_by_employee(
        &self,
        employee_id: i32,
    ) -> Result<Vec<attendances::Model>, AppError> {
        let list = Attendances::find()
            .filter(attendances::Column::EmployeeId.eq(employee_id))
            .order_by_asc(attendances::Column::Date)
            .order_by_asc(attendances::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(list)
    }

    async fn find_attendance(&self, id: i32) -> Result<Option<attendances::Model>, AppError> {
        let record = Attendances::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(record)
    }

    async fn create_attendance(
        &self,
        new: NewAttendance,
    ) -> Result<attendances::Model, AppError> {
        if self.find_employee(new.employee_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "employee {} does not exist",
                new.employee_id
            )));
        }

        let now = Utc::now();
        let record = attendances::ActiveModel {
            employee_id: Set(new.employee_id),
            date: Set(new.date),
            check_in_time: Set(new.check_in_time),
            check_out_time: Set(new.check_out_time),
            status: Set(new.status),
            description: Set(new.description),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let result = record.insert(self.db.as_ref()).await?;
        Ok(result)
    }

    async fn update_attendance(
        &self,
        id: i32,
        changes: AttendanceChanges,
    ) -> Result<attendances::Model, AppError> {
        let record = Attendances::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(employee_id) = changes.employee_id
            && self.find_employee(employee_id).await?.is_none()
        {
            return Err(AppError::BadRequest(format!(
                "employee {} does not exist",
                employee_id
            )));
        }

        let mut active: attendances::ActiveModel = record.into();
        if let Some(employee_id) = changes.employee_id {
            active.employee_id = Set(employee_id);
        }
        if let Some(date) = changes.date {
            active.date = Set(date);
        }
        if let Some(time) = changes.check_in_time {
            active.check_in_time = Set(Some(time));
        }
        if let Some(time) = changes.check_out_time {
            active.check_out_time = Set(Some(time));
        }
        if let Some(status) = changes.status {
            active.status = Set(Some(status));
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated)
    }

    async fn delete_attendance(&self, id: i32) -> Result<(), AppError> {
        let result = Attendances::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn clock_in(
        &self,
        employee_id: i32,
        at: DateTime<Utc>,
    ) -> Result<attendances::Model, AppError> {
        self.require_employee(employee_id).await?;
        let (date, time) = self.local_date_time(at);
        let now = Utc::now();

        let record = match self.find_daily_record(employee_id, date).await? {
            Some(existing) if existing.check_in_time.is_some() => {
                return Err(AppError::BadRequest(format!(
                    "employee {} already clocked in on {}",
                    employee_id, date
                )));
            }
            Some(existing) => {
                let mut active: attendances::ActiveModel = existing.into();
                active.check_in_time = Set(Some(time));
                active.status = Set(Some(STATUS_CLOCKED_IN.to_string()));
                active.updated_at = Set(now.into());
                active.update(self.db.as_ref()).await?
            }
            None => {
                let active = attendances::ActiveModel {
                    employee_id: Set(employee_id),
                    date: Set(date),
                    check_in_time: Set(Some(time)),
                    status: Set(Some(STATUS_CLOCKED_IN.to_string())),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                    ..Default::default()
                };
                active.insert(self.db.as_ref()).await?
            }
        };

        tracing::info!(employee_id, %date, %time, "Clocked in");
        Ok(record)
    }

    async fn clock_out(
        &self,
        employee_id: i32,
        at: DateTime<Utc>,
    ) -> Result<attendances::Model, AppError> {
        self.require_employee(employee_id).await?;
        let (date, time) = self.local_date_time(at);

        let existing = self
            .find_daily_record(employee_id, date)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "employee {} has not clocked in on {}",
                    employee_id, date
                ))
            })?;

        if existing.check_out_time.is_some() {
            return Err(AppError::BadRequest(format!(
                "employee {} already clocked out on {}",
                employee_id, date
            )));
        }

        let mut active: attendances::ActiveModel = existing.into();
        active.check_out_time = Set(Some(time));
        active.status = Set(Some(STATUS_CLOCKED_OUT.to_string()));
        active.updated_at = Set(Utc::now().into());
        let record = active.update(self.db.as_ref()).await?;

        tracing::info!(employee_id, %date, %time, "Clocked out");
        Ok(record)
    }
}
