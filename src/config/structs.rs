use serde::{Deserialize, Serialize};

/// 应用程序配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub attendance: AttendanceConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_database_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_database_min_connections")]
    pub min_connections: u32,
}

/// 迁移配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// 脚本根目录（包含 table/ 和 seed/），生成器写入此处
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
    /// 以磁盘上的脚本文件为准列出待执行脚本（开发环境使用）
    #[serde(default)]
    pub list_from_disk: bool,
    /// 服务启动时自动执行待处理脚本
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

/// 考勤配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceConfig {
    /// 计算打卡日期和时间使用的 UTC 偏移（分钟）
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

// ============ Default Functions ============

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://attendance.db?mode=rwc".to_string()
}

fn default_database_max_connections() -> u32 {
    10
}

fn default_database_min_connections() -> u32 {
    2
}

fn default_scripts_dir() -> String {
    "migration/src".to_string()
}

fn default_auto_migrate() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_enable_rotation() -> bool {
    true
}

fn default_max_backups() -> u32 {
    5
}

// ============ Default Trait Implementations ============

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_database_max_connections(),
            min_connections: default_database_min_connections(),
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            list_from_disk: false,
            auto_migrate: default_auto_migrate(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            enable_rotation: default_enable_rotation(),
            max_backups: default_max_backups(),
        }
    }
}
