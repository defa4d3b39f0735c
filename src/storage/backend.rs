use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Timelike, Utc};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 考勤记录状态：上班
pub const STATUS_CLOCKED_IN: &str = "hadir";
/// 考勤记录状态：下班
pub const STATUS_CLOCKED_OUT: &str = "pulang";

/// SeaORM 存储后端
pub struct SeaOrmBackend {
    pub(crate) db: Arc<DatabaseConnection>,
    offset: FixedOffset,
}

impl SeaOrmBackend {
    /// 使用 UTC 计算考勤日期
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self::with_offset(db, Utc.fix())
    }

    pub fn with_offset(db: Arc<DatabaseConnection>, offset: FixedOffset) -> Self {
        Self { db, offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// 某一时刻在配置时区下的日期
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// 某一时刻在配置时区下的日期和时间（精确到秒）
    pub(crate) fn local_date_time(&self, at: DateTime<Utc>) -> (NaiveDate, NaiveTime) {
        let local = at.with_timezone(&self.offset);
        let time = local.time();
        let time = time.with_nanosecond(0).unwrap_or(time);
        (local.date_naive(), time)
    }
}
