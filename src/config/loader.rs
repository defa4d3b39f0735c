use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use chrono::FixedOffset;

use super::{AppConfig, AttendanceConfig};
use crate::errors::AppError;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static CONFIG_PATH: OnceLock<String> = OnceLock::new();

/// UTC 偏移上限（±14 小时）
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

impl AppConfig {
    /// 从文件加载配置,支持环境变量覆盖
    ///
    /// # 参数
    /// * `config_path` - 可选的配置文件路径
    ///   - `Some(path)`: 使用指定文件（不存在则创建）
    ///   - `None`: 使用默认 "config.toml"（不存在则警告）
    pub fn load(config_path: Option<&str>) -> Self {
        let mut config = Self::load_from_file(config_path);
        config.override_with_env();
        config
    }

    /// 从 TOML 文件加载配置
    fn load_from_file(config_path: Option<&str>) -> Self {
        let path = config_path.unwrap_or("config.toml");
        let is_custom_path = config_path.is_some();

        if !Path::new(path).exists() {
            if is_custom_path {
                eprintln!("[WARN] 配置文件不存在: {}", path);
                eprintln!("[WARN] 正在创建默认配置文件...");
                if let Err(e) = Self::default().save_to_file(path) {
                    eprintln!("[ERROR] 创建配置文件失败 {}: {}", path, e);
                    eprintln!("[WARN] 使用内存默认配置");
                    return Self::default();
                }
                eprintln!("[INFO] 配置文件已创建: {}", path);
            } else {
                eprintln!("[WARN] 未找到配置文件: {}", path);
                eprintln!("[WARN] 使用内存默认配置");
                eprintln!("[HINT] 使用 -c/--config 指定自定义配置文件");
                return Self::default();
            }
        }

        match Self::from_toml_file(path) {
            Ok(config) => {
                eprintln!("[INFO] 配置已从文件加载: {}", path);
                config
            }
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                eprintln!("[WARN] 使用内存默认配置");
                Self::default()
            }
        }
    }

    /// 读取并解析 TOML 配置文件
    pub fn from_toml_file(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("读取配置文件失败 {}: {}", path, e)))?;
        toml::from_str::<AppConfig>(&content)
            .map_err(|e| AppError::Config(format!("解析配置文件失败 {}: {}", path, e)))
    }

    /// 用环境变量覆盖配置
    fn override_with_env(&mut self) {
        // 服务器配置
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            } else {
                eprintln!("[ERROR] 无效的 SERVER_PORT: {}", port);
            }
        }

        // 数据库配置
        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.database.url = database_url;
        }
        if let Ok(max_conn) = env::var("DATABASE_MAX_CONNECTIONS") {
            if let Ok(n) = max_conn.parse() {
                self.database.max_connections = n;
            } else {
                eprintln!("[ERROR] 无效的 DATABASE_MAX_CONNECTIONS: {}", max_conn);
            }
        }
        if let Ok(min_conn) = env::var("DATABASE_MIN_CONNECTIONS") {
            if let Ok(n) = min_conn.parse() {
                self.database.min_connections = n;
            } else {
                eprintln!("[ERROR] 无效的 DATABASE_MIN_CONNECTIONS: {}", min_conn);
            }
        }

        // 迁移配置
        if let Ok(dir) = env::var("MIGRATION_SCRIPTS_DIR") {
            self.migration.scripts_dir = dir;
        }
        if let Ok(enable) = env::var("MIGRATION_LIST_FROM_DISK") {
            self.migration.list_from_disk = enable == "true" || enable == "1";
        }
        if let Ok(enable) = env::var("MIGRATION_AUTO_MIGRATE") {
            self.migration.auto_migrate = enable == "true" || enable == "1";
        }

        // 考勤配置
        if let Ok(offset) = env::var("ATTENDANCE_UTC_OFFSET_MINUTES") {
            if let Ok(n) = offset.parse() {
                self.attendance.utc_offset_minutes = n;
            } else {
                eprintln!("[ERROR] 无效的 ATTENDANCE_UTC_OFFSET_MINUTES: {}", offset);
            }
        }

        // 日志配置
        if let Ok(level) = env::var("RUST_LOG") {
            self.log.level = level;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            self.log.format = format;
        }
        if let Ok(file) = env::var("LOG_FILE") {
            self.log.file = Some(file);
        }
        if let Ok(enable) = env::var("LOG_ENABLE_ROTATION") {
            self.log.enable_rotation = enable == "true" || enable == "1";
        }
        if let Ok(backups) = env::var("LOG_MAX_BACKUPS") {
            if let Ok(n) = backups.parse() {
                self.log.max_backups = n;
            } else {
                eprintln!("[ERROR] 无效的 LOG_MAX_BACKUPS: {}", backups);
            }
        }
    }

    /// 保存当前配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("序列化配置失败: {}", e)))?;

        // 如果需要,创建父目录
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("创建配置目录失败: {}", e)))?;
        }

        fs::write(path, content).map_err(|e| AppError::Config(format!("写入配置失败: {}", e)))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::Config("数据库 URL 不能为空".into()));
        }

        if self.server.port == 0 {
            return Err(AppError::Config("服务端口必须大于 0".into()));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::Config(
                "database.min_connections 不能大于 max_connections".into(),
            ));
        }

        self.attendance.utc_offset()?;
        Ok(())
    }
}

impl AttendanceConfig {
    /// 打卡使用的固定时区偏移
    pub fn utc_offset(&self) -> Result<FixedOffset, AppError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(AppError::Config(format!(
                "attendance.utc_offset_minutes 超出范围: {}",
                self.utc_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            AppError::Config(format!(
                "无效的 attendance.utc_offset_minutes: {}",
                self.utc_offset_minutes
            ))
        })
    }
}

// ============ 全局配置实例 ============

/// 获取全局配置实例
pub fn get_config() -> &'static AppConfig {
    CONFIG.get().expect("配置未初始化,请先调用 init_config()")
}

/// 初始化全局配置
///
/// # 参数
/// * `config_path` - 可选的配置文件路径
///   - `Some(path)`: 从指定文件加载（不存在则创建）
///   - `None`: 从默认 "config.toml" 加载（不存在则警告）
pub fn init_config(config_path: Option<String>) -> &'static AppConfig {
    if let Some(path) = &config_path {
        CONFIG_PATH.set(path.clone()).ok();
    }

    CONFIG.get_or_init(|| AppConfig::load(config_path.as_deref()))
}

/// 获取使用的配置文件路径
pub fn get_config_path() -> Option<&'static str> {
    CONFIG_PATH.get().map(|s| s.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.attendance.utc_offset_minutes, 0);
        assert_eq!(config.attendance.utc_offset().unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_offset() {
        let mut config = AppConfig::default();
        config.attendance.utc_offset_minutes = 15 * 60;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.attendance.utc_offset_minutes = 7 * 60;
        let offset = config.attendance.utc_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = "  ".into();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            url = "sqlite::memory:"

            [migration]
            list_from_disk = true
            "#,
        )
        .unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 10);
        assert!(config.migration.list_from_disk);
        assert!(config.migration.auto_migrate);
        assert_eq!(config.migration.scripts_dir, "migration/src");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.attendance.utc_offset_minutes = 420;

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.attendance.utc_offset_minutes, 420);
    }
}
