use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::Todo;

pub const TODOS_KEY: &str = "todos";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] io::Error),
    #[error("storage json: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value store kept in a single JSON file, playing the part of
/// the browser's `localStorage`.
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&items)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }

    /// The persisted todo list, `None` when nothing usable is stored.
    /// Entries that do not decode are skipped; the rest are kept.
    pub fn load_todos(&self) -> Option<Vec<Todo>> {
        let raw = self.get_item(TODOS_KEY).ok()??;
        let items = serde_json::from_str::<Vec<Value>>(&raw).ok()?;
        let mut todos = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Todo>(item) {
                Ok(todo) => todos.push(todo),
                Err(err) => warn!(error = %err, "skipping unreadable stored todo"),
            }
        }
        Some(todos)
    }

    pub fn save_todos(&self, todos: &[Todo]) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(todos)?;
        self.set_item(TODOS_KEY, &serialized)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn sample() -> Vec<Todo> {
        vec![Todo {
            id: 1_760_000_000_000,
            text: "water plants".to_string(),
            completed: true,
            priority: Priority::Low,
            date: "Tue, Oct 14".to_string(),
            created_at: Some("2026-10-14T08:00:00.000Z".to_string()),
        }]
    }

    #[test]
    fn missing_file_has_no_todos() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get_item(TODOS_KEY).unwrap(), None);
        assert!(storage.load_todos().is_none());
    }

    #[test]
    fn todos_persist_under_a_single_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        storage.set_item("theme", "dark").unwrap();
        storage.save_todos(&sample()).unwrap();

        let raw = storage.get_item(TODOS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["createdAt"], "2026-10-14T08:00:00.000Z");
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));

        let reopened = LocalStorage::new(storage.path().to_path_buf());
        assert_eq!(reopened.load_todos(), Some(sample()));
    }

    #[test]
    fn unknown_priority_labels_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        let raw = r#"[
            {"id":1,"text":"a","completed":false,"priority":"high","date":"Today"},
            {"id":2,"text":"b","completed":true,"priority":"urgent","date":"Today"}
        ]"#;
        storage.set_item(TODOS_KEY, raw).unwrap();

        let loaded = storage.load_todos().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].priority, Priority::High);
        assert_eq!(loaded[1].priority, Priority::Other("urgent".to_string()));

        storage.save_todos(&loaded).unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&storage.get_item(TODOS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved[1]["priority"], "urgent");
    }

    #[test]
    fn unreadable_entries_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        let raw = r#"[{"text":"no id"},{"id":3,"text":"keep","priority":"low"}]"#;
        storage.set_item(TODOS_KEY, raw).unwrap();

        let loaded = storage.load_todos().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 3);
        assert_eq!(loaded[0].priority, Priority::Low);
        assert!(!loaded[0].completed);
    }

    #[test]
    fn unparsable_value_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.json"));
        storage.set_item(TODOS_KEY, "{not json").unwrap();
        assert!(storage.load_todos().is_none());
    }
}
