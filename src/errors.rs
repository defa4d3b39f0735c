use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use migration::MigrationError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    // 迁移错误
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    // 通用错误
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "E001",
            AppError::Migration(_) => "E002",
            AppError::NotFound => "E003",
            AppError::BadRequest(_) => "E004",
            AppError::Conflict(_) => "E005",
            AppError::Internal(_) => "E006",
            AppError::Config(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database Error",
            AppError::Migration(MigrationError::Validation(_)) => "Validation Error",
            AppError::Migration(MigrationError::Io { .. }) => "I/O Failure",
            AppError::Migration(
                MigrationError::MissingEntryPoint { .. } | MigrationError::ScriptFailed { .. },
            ) => "Script Execution Error",
            AppError::Migration(
                MigrationError::Ledger(_) | MigrationError::DuplicateEntry { .. },
            ) => "Ledger Error",
            AppError::NotFound => "Not Found",
            AppError::BadRequest(_) => "Bad Request",
            AppError::Conflict(_) => "Conflict",
            AppError::Internal(_) => "Internal Server Error",
            AppError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 将唯一约束冲突转换为 Conflict，其余保持数据库错误
    pub fn from_db_conflict(err: sea_orm::DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(format!("{} already exists", what))
            }
            _ => AppError::Database(err),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Internal(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            AppError::NotFound => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Conflict(_) => "conflict",
            _ => "internal_error",
        };

        // 内部错误不向客户端暴露细节
        let message = if status.is_server_error() {
            tracing::error!("{}", self.format_simple());
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_migration_error_types() {
        let err = AppError::from(MigrationError::Validation("empty".into()));
        assert_eq!(err.error_type(), "Validation Error");
        assert_eq!(err.code(), "E002");

        let err = AppError::from(MigrationError::DuplicateEntry {
            name: "20240101000000_a.rs".into(),
        });
        assert_eq!(err.error_type(), "Ledger Error");
        assert!(err.format_simple().starts_with("[E002] Ledger Error:"));
    }
}
