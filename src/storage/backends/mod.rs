// 子模块
mod attendance;
mod dashboard;
mod employee;
