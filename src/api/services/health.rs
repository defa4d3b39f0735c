use actix_web::{HttpResponse, http::StatusCode, web};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health/ready
pub async fn readiness(db: web::Data<Arc<DatabaseConnection>>) -> HttpResponse {
    let is_ready = match check_database_connection(&db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            false
        }
    };

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "status": if is_ready { "ready" } else { "not_ready" },
        "database": if is_ready { "connected" } else { "disconnected" },
    }))
}

/// GET /health/live
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
    }))
}

/// 检查数据库连接
async fn check_database_connection(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}
