use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;

use crate::errors::AppError;
use crate::storage::entities::{prelude::*, *};
use crate::storage::repository::*;

use super::super::backend::SeaOrmBackend;

#[async_trait]
impl EmployeeRepository for SeaOrmBackend {
    async fn list_employees(&self) -> Result<Vec<employees::Model>, AppError> {
        let list = Employees::find()
            .order_by_asc(employees::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(list)
    }

    async fn find_employee(&self, id: i32) -> Result<Option<employees::Model>, AppError> {
        let employee = Employees::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(employee)
    }

    async fn find_employee_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<employees::Model>, AppError> {
        let employee = Employees::find()
            .filter(employees::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?;
        Ok(employee)
    }

    async fn create_employee(&self, new: NewEmployee) -> Result<employees::Model, AppError> {
        let now = Utc::now();
        let employee = employees::ActiveModel {
            employee_number: Set(new.employee_number),
            name: Set(new.name),
            position: Set(new.position),
            resident_id: Set(new.resident_id),
            region_id: Set(new.region_id),
            is_active: Set(new.is_active.unwrap_or(true)),
            user_id: Set(new.user_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let result = employee
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::from_db_conflict(e, "employee"))?;
        tracing::info!(id = result.id, number = %result.employee_number, "Employee created");
        Ok(result)
    }

    async fn update_employee(
        &self,
        id: i32,
        changes: EmployeeChanges,
    ) -> Result<employees::Model, AppError> {
        let employee = Employees::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: employees::ActiveModel = employee.into();
        if let Some(number) = changes.employee_number {
            active.employee_number = Set(number);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(position) = changes.position {
            active.position = Set(Some(position));
        }
        if let Some(resident_id) = changes.resident_id {
            active.resident_id = Set(Some(resident_id));
        }
        if let Some(region_id) = changes.region_id {
            active.region_id = Set(Some(region_id));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(user_id) = changes.user_id {
            active.user_id = Set(Some(user_id));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::from_db_conflict(e, "employee"))?;
        Ok(updated)
    }

    async fn delete_employee(&self, id: i32) -> Result<(), AppError> {
        let result = Employees::delete_by_id(id).exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        tracing::info!(id, "Employee deleted");
        Ok(())
    }
}
