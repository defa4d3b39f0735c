pub use sea_orm_migration::prelude::*;

pub mod engine;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod script;
pub mod source;
mod templates;

#[path = "seed/mod.rs"]
mod seed_scripts;
#[path = "table/mod.rs"]
mod schema_scripts;


pub use engine::{AppliedScript, MigrationEngine, RunReport};
pub use error::MigrationError;
pub use generator::ScriptGenerator;
pub use ledger::{LEDGER_TABLE, Ledger, LedgerEntry};
pub use script::{EntryPoint, ScriptKind};
pub use source::{Catalog, DirectoryStore, ScriptSource};

/// 编译进程序的全部脚本
pub fn manifest() -> Catalog {
    let mut catalog = Catalog::new();
    schema_scripts::register(&mut catalog);
    seed_scripts::register(&mut catalog);
    catalog
}
