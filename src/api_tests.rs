//! HTTP 接口测试

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::FixedOffset;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::config::MigrationConfig;
use crate::runtime::configure_routes;
use crate::storage::{SeaOrmBackend, run_migrations};

async fn setup_state() -> (Arc<DatabaseConnection>, Arc<SeaOrmBackend>) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    run_migrations(&db, &MigrationConfig::default())
        .await
        .expect("Failed to run migrations");

    let db = Arc::new(db);
    let offset = FixedOffset::east_opt(7 * 3600).unwrap();
    let storage = Arc::new(SeaOrmBackend::with_offset(db.clone(), offset));
    (db, storage)
}

macro_rules! init_app {
    () => {{
        let (db, storage) = setup_state().await;
        test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(storage))
                .configure(configure_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_health_endpoints() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "connected");
}

#[actix_web::test]
async fn test_employee_lifecycle() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({ "employee_number": "EMP010", "name": "Andi", "position": "Staff" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["is_active"], true);
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/employees/{}", id))
        .set_json(json!({ "position": "Supervisor" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["position"], "Supervisor");
    assert_eq!(updated["name"], "Andi");

    let req = test::TestRequest::get().uri("/employees").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 4);

    let req = test::TestRequest::delete()
        .uri(&format!("/employees/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "success": true }));

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn test_employee_validation_and_conflict() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({ "employee_number": "EMP011" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({ "employee_number": "EMP001", "name": "Duplicate" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_employee_by_user() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/employees/user/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["employee_number"], "EMP002");

    let req = test::TestRequest::get().uri("/employees/user/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_clock_in_and_out_routes() {
    let app = init_app!();

    // 01:00Z 在 UTC+7 为 08:00
    let req = test::TestRequest::post()
        .uri("/attendances/clock-in")
        .set_json(json!({ "employee_id": 2, "time": "2025-12-15T01:00:00Z" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let record: Value = test::read_body_json(resp).await;
    assert_eq!(record["date"], "2025-12-15");
    assert_eq!(record["check_in_time"], "08:00:00");
    assert_eq!(record["status"], "hadir");

    let req = test::TestRequest::post()
        .uri("/attendances/clock-in")
        .set_json(json!({ "employee_id": 2, "time": "2025-12-15T02:00:00Z" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/attendances/clock-out")
        .set_json(json!({ "employee_id": 2, "time": "2025-12-15T10:30:00Z" }))
        .to_request();
    let record: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(record["check_out_time"], "17:30:00");
    assert_eq!(record["status"], "pulang");

    let req = test::TestRequest::get()
        .uri("/attendances/employee/2")
        .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri("/attendances/clock-in")
        .set_json(json!({ "employee_id": 999 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_attendance_crud_routes() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/attendances")
        .set_json(json!({
            "employee_id": 3,
            "date": "2025-12-01",
            "check_in_time": "07:30",
            "status": "hadir"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["check_in_time"], "07:30:00");
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/attendances/{}", id))
        .set_json(json!({ "description": "terlambat" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["description"], "terlambat");
    assert_eq!(updated["status"], "hadir");

    let req = test::TestRequest::post()
        .uri("/attendances")
        .set_json(json!({ "employee_id": 3, "date": "01-12-2025" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/attendances/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/attendances/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_dashboard_routes() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/dashboard/total-employees")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "totalEmployees": 3 }));

    for employee_id in [1, 2] {
        let req = test::TestRequest::post()
            .uri("/attendances")
            .set_json(json!({ "employee_id": employee_id, "date": "2025-10-01", "status": "izin" }))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::post()
        .uri("/attendances")
        .set_json(json!({ "employee_id": 3, "date": "2025-10-01" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/dashboard/attendance?date=2025-10-01")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["date"], "2025-10-01");
    assert_eq!(body["total"], 3);
    assert_eq!(body["by_status"], json!({ "izin": 2, "unknown": 1 }));

    let req = test::TestRequest::get()
        .uri("/dashboard/attendance?date=yesterday")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
