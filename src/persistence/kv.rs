use super::files::{atomic_write, ensure_dir, read_file};
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Storage key for the task list
pub const TASKS_KEY: &str = "todos:tasks:v1";
/// Storage key for the category name list
pub const CATEGORIES_KEY: &str = "todos:categories:v1";
/// Storage key for the category colour map
pub const CATEGORY_COLORS_KEY: &str = "todos:categoryColors:v1";

/// Key-value persistence for JSON blobs.
///
/// `read` never fails: unreadable or malformed data is reported as absent.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<Value>;
    fn write(&mut self, key: &str, value: &Value) -> Result<()>;

    /// Human-readable description of where data lives
    fn location(&self) -> String;
}

/// One pretty-printed JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    /// File backing `key`, e.g. `todos:tasks:v1` -> `todos_tasks_v1.json`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        let content = match read_file(&path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!(key, path = %path.display(), "no stored value");
                return None;
            }
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "failed to read stored value");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "stored value is not valid JSON");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        atomic_write(self.path_for(key), &json)
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}

/// In-memory store for tests and throwaway sessions.
///
/// Values are kept as raw strings so corrupt data can be injected.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Store raw text under `key`, bypassing JSON encoding
    pub fn insert_raw(&mut self, key: &str, raw: &str) {
        self.entries.insert(key.to_string(), raw.to_string());
    }

    /// Raw text under `key`
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<Value> {
        let raw = self.entries.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is not valid JSON");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<()> {
        self.entries
            .insert(key.to_string(), serde_json::to_string(value)?);
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory (not saved)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_path_for_sanitizes_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert_eq!(store.location(), temp_dir.path().display().to_string());
        assert_eq!(
            store.path_for(TASKS_KEY),
            temp_dir.path().join("todos_tasks_v1.json")
        );
        assert_eq!(
            store.path_for(CATEGORY_COLORS_KEY),
            temp_dir.path().join("todos_categoryColors_v1.json")
        );
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp_dir.path().join("data")).unwrap();

        assert_eq!(store.read(CATEGORIES_KEY), None);

        let value = json!(["Werk", "Health"]);
        store.write(CATEGORIES_KEY, &value).unwrap();
        assert_eq!(store.read(CATEGORIES_KEY), Some(value));
    }

    #[test]
    fn test_file_store_corrupt_file_is_absent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        fs::write(store.path_for(TASKS_KEY), "{not json").unwrap();

        assert_eq!(store.read(TASKS_KEY), None);
    }

    #[test]
    fn test_memory_store_raw_and_writes() {
        let mut store = MemoryStore::new();
        store.insert_raw(CATEGORIES_KEY, "garbage");
        assert_eq!(store.read(CATEGORIES_KEY), None);

        store.write(CATEGORIES_KEY, &json!(["A"])).unwrap();
        assert_eq!(store.raw(CATEGORIES_KEY), Some(r#"["A"]"#));
        assert_eq!(store.writes(), 1);
        assert_eq!(store.location(), "memory (not saved)");
    }
}
