//! 数据填充脚本清单
//!
//! 新增脚本后需在此登记，文件名即记录表中的脚本名。

use crate::script::ScriptKind;
use crate::source::Catalog;

#[path = "20251213000001_seed_employees.rs"]
mod seed_employees;
#[path = "20251213000002_seed_sample_attendance.rs"]
mod seed_sample_attendance;
#[path = "20251214204524_add_user_id.rs"]
mod add_user_id;

pub(crate) fn register(catalog: &mut Catalog) {
    catalog.register(
        ScriptKind::Seed,
        "20251213000001_seed_employees.rs",
        seed_employees::Script,
    );
    catalog.register(
        ScriptKind::Seed,
        "20251213000002_seed_sample_attendance.rs",
        seed_sample_attendance::Script,
    );
    catalog.register(
        ScriptKind::Seed,
        "20251214204524_add_user_id.rs",
        add_user_id::Script,
    );
}
