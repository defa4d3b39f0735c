pub mod backend;
mod backends;
pub mod connection;
pub mod entities;
pub mod repository;

#[cfg(test)]
mod backend_tests;

pub use backend::{STATUS_CLOCKED_IN, STATUS_CLOCKED_OUT, SeaOrmBackend};
pub use connection::{connect, migration_engine, run_migrations};
pub use repository::{
    AttendanceChanges, AttendanceRepository, AttendanceSummary, DashboardRepository,
    EmployeeChanges, EmployeeRepository, NewAttendance, NewEmployee,
};
