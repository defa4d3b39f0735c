//! 脚本文件生成器

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tempfile::NamedTempFile;

use crate::error::MigrationError;
use crate::script::{ScriptKind, script_filename, slugify, timestamp};
use crate::templates::template;

pub struct ScriptGenerator {
    root: PathBuf,
}

impl ScriptGenerator {
    /// `root` 下包含 `table/` 和 `seed/` 两个脚本目录
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 以当前本地时间生成脚本
    pub fn generate(&self, name: &str, kind: ScriptKind) -> Result<PathBuf, MigrationError> {
        self.generate_at(name, kind, Local::now().naive_local())
    }

    /// 以指定时间生成脚本
    ///
    /// 内容先写入同目录下的临时文件，完整写入后再改名为目标文件；
    /// 目标文件已存在时报错，不会覆盖。
    pub fn generate_at(
        &self,
        name: &str,
        kind: ScriptKind,
        at: NaiveDateTime,
    ) -> Result<PathBuf, MigrationError> {
        if name.trim().is_empty() {
            return Err(MigrationError::Validation("script name is required".into()));
        }

        let slug = slugify(name);
        if slug.is_empty() {
            return Err(MigrationError::Validation(format!(
                "script name '{}' contains no usable characters",
                name
            )));
        }

        let filename = script_filename(&timestamp(at), &slug);
        let dir = self.root.join(kind.dir_name());
        fs::create_dir_all(&dir).map_err(|e| MigrationError::io(&dir, e))?;

        let path = dir.join(&filename);
        let mut file = NamedTempFile::new_in(&dir).map_err(|e| MigrationError::io(&dir, e))?;
        file.write_all(template(kind).as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| MigrationError::io(file.path(), e))?;
        file.persist_noclobber(&path)
            .map_err(|e| MigrationError::io(&path, e.error))?;

        tracing::info!("Created {} script {}", kind, path.display());
        Ok(path)
    }
}
