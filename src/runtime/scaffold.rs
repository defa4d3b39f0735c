use colored::Colorize;
use migration::{ScriptGenerator, ScriptKind};
use std::path::{Path, PathBuf};

use crate::config::MigrationConfig;
use crate::config::args::MakeScriptArgs;
use crate::errors::AppError;

/// `make-script` 子命令：生成脚本文件并提示登记方式
pub fn make_script(config: &MigrationConfig, args: &MakeScriptArgs) -> Result<PathBuf, AppError> {
    let kind = args.kind;
    let generator = ScriptGenerator::new(&config.scripts_dir);
    let path = generator.generate(&args.name, kind)?;

    println!("{} {}", "Created".green().bold(), path.display());
    if let Some(hint) = registration_hint(&path, kind) {
        let manifest = generator.root().join(kind.dir_name()).join("mod.rs");
        println!(
            "{} register it in {}:",
            "Next:".yellow().bold(),
            manifest.display()
        );
        println!("{}", hint.dimmed());
    }

    Ok(path)
}

/// 生成登记到清单所需的代码片段
fn registration_hint(path: &Path, kind: ScriptKind) -> Option<String> {
    let file = path.file_name()?.to_str()?;
    let stem = path.file_stem()?.to_str()?;
    // 去掉时间戳前缀作为模块名
    let slug = stem.split_once('_').map(|(_, slug)| slug)?;
    let module = if slug.starts_with(|c: char| c.is_ascii_digit()) {
        format!("m_{}", slug)
    } else {
        slug.to_string()
    };
    let variant = match kind {
        ScriptKind::Schema => "Schema",
        ScriptKind::Seed => "Seed",
    };

    Some(format!(
        "    #[path = \"{file}\"]\n    mod {module};\n\n    catalog.register(ScriptKind::{variant}, \"{file}\", {module}::Script);"
    ))
}
