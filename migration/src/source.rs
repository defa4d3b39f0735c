use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::script::{EntryPoint, ScriptKind, is_script_filename};

/// 脚本来源: 列出某一类脚本并解析其入口
pub trait ScriptSource: Send + Sync {
    /// 按文件名升序列出脚本
    fn list(&self, kind: ScriptKind) -> Vec<String>;

    /// 解析脚本入口，未注册时返回 None
    fn resolve(&self, kind: ScriptKind, name: &str) -> Option<Arc<dyn EntryPoint>>;
}

impl<S: ScriptSource + ?Sized> ScriptSource for Box<S> {
    fn list(&self, kind: ScriptKind) -> Vec<String> {
        (**self).list(kind)
    }

    fn resolve(&self, kind: ScriptKind, name: &str) -> Option<Arc<dyn EntryPoint>> {
        (**self).resolve(kind, name)
    }
}

/// 编译期脚本清单
#[derive(Default, Clone)]
pub struct Catalog {
    entries: BTreeMap<(ScriptKind, String), Arc<dyn EntryPoint>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册脚本，同名脚本会被覆盖
    pub fn register<E>(&mut self, kind: ScriptKind, name: impl Into<String>, entry: E)
    where
        E: EntryPoint + 'static,
    {
        self.entries.insert((kind, name.into()), Arc::new(entry));
    }

    pub fn with<E>(mut self, kind: ScriptKind, name: impl Into<String>, entry: E) -> Self
    where
        E: EntryPoint + 'static,
    {
        self.register(kind, name, entry);
        self
    }
}

impl ScriptSource for Catalog {
    fn list(&self, kind: ScriptKind) -> Vec<String> {
        // BTreeMap 按 (kind, name) 有序
        self.entries
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn resolve(&self, kind: ScriptKind, name: &str) -> Option<Arc<dyn EntryPoint>> {
        self.entries.get(&(kind, name.to_string())).cloned()
    }
}

/// 基于目录的脚本来源
///
/// 以磁盘上实际存在的文件为准列出脚本，入口从 `Catalog` 解析。
/// 磁盘上存在但未注册的文件会在执行时报缺少入口。
pub struct DirectoryStore {
    root: PathBuf,
    catalog: Catalog,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    pub fn collection_dir(&self, kind: ScriptKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }
}

impl ScriptSource for DirectoryStore {
    fn list(&self, kind: ScriptKind) -> Vec<String> {
        let dir = self.collection_dir(kind);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Cannot read {} script directory {}: {}",
                    kind,
                    dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_script_filename(name))
            .collect();
        names.sort();
        names
    }

    fn resolve(&self, kind: ScriptKind, name: &str) -> Option<Arc<dyn EntryPoint>> {
        self.catalog.resolve(kind, name)
    }
}
