//! 表结构脚本清单
//!
//! 新增脚本后需在此登记，文件名即记录表中的脚本名。

use crate::script::ScriptKind;
use crate::source::Catalog;

#[path = "20251213000001_create_employees_table.rs"]
mod create_employees_table;
#[path = "20251213000002_create_attendances_table.rs"]
mod create_attendances_table;
#[path = "20251214204521_add_user_id.rs"]
mod add_user_id;

pub(crate) fn register(catalog: &mut Catalog) {
    catalog.register(
        ScriptKind::Schema,
        "20251213000001_create_employees_table.rs",
        create_employees_table::Script,
    );
    catalog.register(
        ScriptKind::Schema,
        "20251213000002_create_attendances_table.rs",
        create_attendances_table::Script,
    );
    catalog.register(
        ScriptKind::Schema,
        "20251214204521_add_user_id.rs",
        add_user_id::Script,
    );
}
