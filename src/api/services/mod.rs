pub mod attendance_service;
pub mod dashboard_service;
pub mod employee_service;
pub mod health;

// 健康检查
pub use health::{health_check, liveness, readiness};

// 员工服务
pub use employee_service::{
    create_employee as employee_create, delete_employee as employee_delete,
    get_employee as employee_get, get_employee_by_user as employee_get_by_user,
    list_employees as employee_list, update_employee as employee_update,
};

// 考勤服务
pub use attendance_service::{
    clock_in as attendance_clock_in, clock_out as attendance_clock_out,
    create_attendance as attendance_create, delete_attendance as attendance_delete,
    get_attendance as attendance_get, list_attendances as attendance_list,
    list_by_employee as attendance_list_by_employee, update_attendance as attendance_update,
};

// 仪表盘
pub use dashboard_service::{
    attendance_summary as dashboard_attendance_summary,
    total_employees as dashboard_total_employees,
};
