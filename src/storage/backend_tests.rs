#[cfg(test)]
mod tests {
    use super::super::backend::SeaOrmBackend;
    use crate::config::MigrationConfig;
    use crate::errors::AppError;
    use crate::storage::{
        AttendanceChanges, AttendanceRepository, DashboardRepository, EmployeeChanges,
        EmployeeRepository, NewAttendance, NewEmployee, STATUS_CLOCKED_IN, STATUS_CLOCKED_OUT,
    };
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
    use sea_orm::{Database, DatabaseConnection};
    use std::sync::Arc;

    /// 创建测试用的内存数据库
    async fn setup_test_db() -> Arc<DatabaseConnection> {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        // 运行 migrations
        use crate::storage::run_migrations;
        run_migrations(&db, &MigrationConfig::default())
            .await
            .expect("Failed to run migrations");

        Arc::new(db)
    }

    fn new_employee(number: &str, name: &str) -> NewEmployee {
        NewEmployee {
            employee_number: number.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_employees_are_listed_in_order() {
        let backend = SeaOrmBackend::new(setup_test_db().await);

        let list = backend.list_employees().await.unwrap();
        let numbers: Vec<_> = list.iter().map(|e| e.employee_number.as_str()).collect();
        assert_eq!(numbers, ["EMP001", "EMP002", "EMP003"]);

        // 数据脚本回填 user_id = id
        assert!(list.iter().all(|e| e.user_id == Some(e.id)));
        assert!(list.iter().all(|e| e.is_active));
    }

    #[tokio::test]
    async fn test_create_update_delete_employee() {
        let backend = SeaOrmBackend::new(setup_test_db().await);

        let created = backend
            .create_employee(NewEmployee {
                position: Some("Staff".into()),
                is_active: Some(false),
                ..new_employee("EMP100", "Dewi Lestari")
            })
            .await
            .unwrap();
        assert!(!created.is_active);
        assert_eq!(created.position.as_deref(), Some("Staff"));

        let updated = backend
            .update_employee(
                created.id,
                EmployeeChanges {
                    name: Some("Dewi L.".into()),
                    user_id: Some(500),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Dewi L.");
        assert_eq!(updated.employee_number, "EMP100");
        assert_eq!(updated.position.as_deref(), Some("Staff"));

        let by_user = backend.find_employee_by_user(500).await.unwrap().unwrap();
        assert_eq!(by_user.id, created.id);

        backend.delete_employee(created.id).await.unwrap();
        assert!(backend.find_employee(created.id).await.unwrap().is_none());
        assert!(matches!(
            backend.delete_employee(created.id).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_employee_number_is_conflict() {
        let backend = SeaOrmBackend::new(setup_test_db().await);

        let result = backend
            .create_employee(new_employee("EMP001", "Someone Else"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_employee_is_not_found() {
        let backend = SeaOrmBackend::new(setup_test_db().await);

        let result = backend
            .update_employee(9999, EmployeeChanges::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_clock_in_then_out() {
        let backend = SeaOrmBackend::new(setup_test_db().await);
        let employee = backend
            .create_employee(new_employee("EMP200", "Rina"))
            .await
            .unwrap();

        let record = backend
            .clock_in(employee.id, utc(2025, 12, 15, 8, 5, 30))
            .await
            .unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
        assert_eq!(record.check_in_time, NaiveTime::from_hms_opt(8, 5, 30));
        assert_eq!(record.status.as_deref(), Some(STATUS_CLOCKED_IN));

        let again = backend
            .clock_in(employee.id, utc(2025, 12, 15, 9, 0, 0))
            .await;
        assert!(matches!(again, Err(AppError::BadRequest(_))));

        let record = backend
            .clock_out(employee.id, utc(2025, 12, 15, 17, 0, 0))
            .await
            .unwrap();
        assert_eq!(record.check_out_time, NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(record.check_in_time, NaiveTime::from_hms_opt(8, 5, 30));
        assert_eq!(record.status.as_deref(), Some(STATUS_CLOCKED_OUT));

        let again = backend
            .clock_out(employee.id, utc(2025, 12, 15, 18, 0, 0))
            .await;
        assert!(matches!(again, Err(AppError::BadRequest(_))));

        let records = backend
            .list_attendances_by_employee(employee.id)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_clock_out_without_record_is_rejected() {
        let backend = SeaOrmBackend::new(setup_test_db().await);
        let employee = backend
            .create_employee(new_employee("EMP201", "Agus"))
            .await
            .unwrap();

        let result = backend
            .clock_out(employee.id, utc(2025, 12, 15, 17, 0, 0))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_clock_in_unknown_employee_is_not_found() {
        let backend = SeaOrmBackend::new(setup_test_db().await);

        let result = backend.clock_in(9999, Utc::now()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_clock_in_fills_existing_record() {
        let backend = SeaOrmBackend::new(setup_test_db().await);
        let employee = backend
            .create_employee(new_employee("EMP202", "Putri"))
            .await
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();

        let manual = backend
            .create_attendance(NewAttendance {
                employee_id: employee.id,
                date,
                check_in_time: None,
                check_out_time: None,
                status: None,
                description: Some("dinas luar".into()),
            })
            .await
            .unwrap();

        let record = backend
            .clock_in(employee.id, utc(2025, 12, 16, 7, 45, 0))
            .await
            .unwrap();
        assert_eq!(record.id, manual.id);
        assert_eq!(record.description.as_deref(), Some("dinas luar"));
        assert_eq!(record.status.as_deref(), Some(STATUS_CLOCKED_IN));
    }

    #[tokio::test]
    async fn test_clock_uses_configured_offset() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let backend = SeaOrmBackend::with_offset(setup_test_db().await, offset);
        let employee = backend
            .create_employee(new_employee("EMP203", "Wayan"))
            .await
            .unwrap();

        // 23:30 UTC 在 UTC+7 已是次日 06:30
        let clock_in = backend
            .clock_in(employee.id, utc(2025, 12, 16, 23, 30, 0))
            .await
            .unwrap();
        assert_eq!(clock_in.date, NaiveDate::from_ymd_opt(2025, 12, 17).unwrap());
        assert_eq!(clock_in.check_in_time, NaiveTime::from_hms_opt(6, 30, 0));

        // 下班使用同一时区，找到同一条记录
        let clock_out = backend
            .clock_out(employee.id, utc(2025, 12, 17, 10, 0, 0))
            .await
            .unwrap();
        assert_eq!(clock_out.id, clock_in.id);
        assert_eq!(clock_out.check_out_time, NaiveTime::from_hms_opt(17, 0, 0));
    }

    #[tokio::test]
    async fn test_attendance_crud() {
        let backend = SeaOrmBackend::new(setup_test_db().await);
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();

        let result = backend
            .create_attendance(NewAttendance {
                employee_id: 9999,
                date,
                check_in_time: None,
                check_out_time: None,
                status: None,
                description: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let created = backend
            .create_attendance(NewAttendance {
                employee_id: 1,
                date,
                check_in_time: NaiveTime::from_hms_opt(8, 0, 0),
                check_out_time: None,
                status: Some("sakit".into()),
                description: None,
            })
            .await
            .unwrap();

        let updated = backend
            .update_attendance(
                created.id,
                AttendanceChanges {
                    check_out_time: NaiveTime::from_hms_opt(12, 0, 0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status.as_deref(), Some("sakit"));
        assert_eq!(updated.check_out_time, NaiveTime::from_hms_opt(12, 0, 0));

        backend.delete_attendance(created.id).await.unwrap();
        assert!(backend.find_attendance(created.id).await.unwrap().is_none());
        assert!(matches!(
            backend.delete_attendance(created.id).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_dashboard_summary_groups_by_status() {
        let backend = SeaOrmBackend::new(setup_test_db().await);
        let date = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();

        for (employee_id, status) in [(1, Some("hadir")), (2, Some("hadir")), (3, None)] {
            backend
                .create_attendance(NewAttendance {
                    employee_id,
                    date,
                    check_in_time: None,
                    check_out_time: None,
                    status: status.map(str::to_string),
                    description: None,
                })
                .await
                .unwrap();
        }

        let summary = backend.attendance_summary(date).await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_status.get("hadir"), Some(&2));
        assert_eq!(summary.by_status.get("unknown"), Some(&1));

        let empty = backend
            .attendance_summary(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(empty.total, 0);
        assert!(empty.by_status.is_empty());

        assert_eq!(backend.count_employees().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_deleting_employee_cascades_attendance() {
        let backend = SeaOrmBackend::new(setup_test_db().await);
        let employee = backend
            .create_employee(new_employee("EMP300", "Sari"))
            .await
            .unwrap();
        let record = backend
            .clock_in(employee.id, utc(2025, 12, 18, 8, 0, 0))
            .await
            .unwrap();

        backend.delete_employee(employee.id).await.unwrap();
        assert!(backend.find_attendance(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_migrate_command_runs_then_reports_up_to_date() {
        use crate::config::AppConfig;
        use crate::runtime::run_migrate;

        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("attendance.db").display()
        );

        let first = run_migrate(&config).await.expect("first run should apply");
        assert_eq!(first.batch, 1);
        assert_eq!(first.executed_count(), 6);

        // 第一次运行已关闭连接，第二次重新连接同一文件
        let second = run_migrate(&config).await.expect("second run should succeed");
        assert!(second.is_up_to_date());
    }

    #[tokio::test]
    async fn test_disk_listing_reports_unregistered_script() {
        use crate::storage::run_migrations;
        use migration::MigrationError;

        let scripts = tempfile::tempdir().unwrap();
        let table = scripts.path().join("table");
        std::fs::create_dir_all(&table).unwrap();
        std::fs::write(table.join("20990101000000_x.rs"), "").unwrap();

        let config = MigrationConfig {
            scripts_dir: scripts.path().to_string_lossy().into_owned(),
            list_from_disk: true,
            ..MigrationConfig::default()
        };
        let db = Database::connect("sqlite::memory:").await.unwrap();

        let result = run_migrations(&db, &config).await;
        match result {
            Err(AppError::Migration(MigrationError::MissingEntryPoint { name, .. })) => {
                assert_eq!(name, "20990101000000_x.rs");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.batch)),
        }
    }
}
