use crate::script::ScriptKind;

const SCHEMA_TEMPLATE: &str = include_str!("templates/schema.rs");
const SEED_TEMPLATE: &str = include_str!("templates/seed.rs");

/// 新脚本的初始内容，入口为空操作
pub fn template(kind: ScriptKind) -> &'static str {
    match kind {
        ScriptKind::Schema => SCHEMA_TEMPLATE,
        ScriptKind::Seed => SEED_TEMPLATE,
    }
}

// 模板本身作为模块参与测试编译，生成的脚本不应产生警告
#[cfg(test)]
#[deny(unused_imports, unused_variables)]
#[path = "templates/schema.rs"]
mod schema_template;

#[cfg(test)]
#[deny(unused_imports, unused_variables)]
#[path = "templates/seed.rs"]
mod seed_template;
