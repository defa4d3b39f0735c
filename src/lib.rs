pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;

#[cfg(test)]
mod api_tests;

// 重新导出常用类型
pub use config::AppConfig;
pub use errors::AppError;
