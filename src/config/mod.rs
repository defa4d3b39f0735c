pub mod args;
pub mod loader;
pub mod structs;

pub use loader::{get_config, get_config_path, init_config};
pub use structs::{
    AppConfig, AttendanceConfig, DatabaseConfig, LogConfig, MigrationConfig, ServerConfig,
};
