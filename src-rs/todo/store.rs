use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, Utc};
use thiserror::Error;
use tracing::info;

use super::types::{short_date, NewTodo, Todo, TodoPatch};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Todo not found")]
    NotFound(u64),
}

struct Inner {
    todos: Vec<Todo>,
    next_id: u64,
}

/// The authoritative todo list for one process lifetime.
///
/// Every mutation takes the write lock, so concurrent create/update/delete
/// calls are serialized.
pub struct TodoStore {
    inner: RwLock<Inner>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn list(&self) -> Vec<Todo> {
        self.read().todos.clone()
    }

    pub fn get(&self, id: u64) -> Option<Todo> {
        self.read().todos.iter().find(|todo| todo.id == id).cloned()
    }

    pub fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
        let text = required_text(input.text.as_deref())?;
        let mut inner = self.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let todo = Todo {
            id,
            text,
            completed: false,
            priority: input.priority.unwrap_or_default(),
            date: short_date(Local::now()),
            created_at: Utc::now(),
        };
        inner.todos.insert(0, todo.clone());
        info!(id, priority = todo.priority.as_str(), "todo created");
        Ok(todo)
    }

    pub fn update(&self, id: u64, patch: TodoPatch) -> Result<Todo, StoreError> {
        // Validate before touching the list so a rejected patch changes nothing.
        let text = match patch.text.as_deref() {
            Some(raw) => Some(required_text(Some(raw))?),
            None => None,
        };
        let mut inner = self.write();
        let todo = inner
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(text) = text {
            todo.text = text;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        info!(id, completed = todo.completed, "todo updated");
        Ok(todo.clone())
    }

    pub fn delete(&self, id: u64) -> Result<Todo, StoreError> {
        let mut inner = self.write();
        let index = inner
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = inner.todos.remove(index);
        info!(id, "todo deleted");
        Ok(removed)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn required_text(raw: Option<&str>) -> Result<String, StoreError> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(StoreError::Validation("Todo text is required".to_string())),
    }
}
