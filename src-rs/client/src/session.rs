use tracing::{info, warn};

use crate::client::{ClientError, TodoBackend};
use crate::models::{Filter, Priority, Stats, Todo, UpdateRequest};
use crate::state;
use crate::storage::LocalStorage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The service answered at startup; every mutation is pushed to it.
    Synced,
    /// Local storage is the only store.
    Offline,
}

/// Client view-model: the local mirror of the todo list plus UI selections.
///
/// Each mutation is applied locally first and persisted. In `Synced` mode it
/// is then sent to the service; a failed request restores the previous list.
pub struct TodoSession<B> {
    todos: Vec<Todo>,
    pub filter: Filter,
    pub priority: Priority,
    storage: LocalStorage,
    backend: Option<B>,
}

impl<B: TodoBackend> TodoSession<B> {
    pub fn start(backend: Option<B>, storage: LocalStorage) -> Self {
        let (todos, backend) = match backend {
            Some(backend) => match backend.list() {
                Ok(todos) => {
                    info!(count = todos.len(), "loaded todos from service");
                    (todos, Some(backend))
                }
                Err(err) => {
                    warn!(error = %err, "service unavailable, using local storage instead");
                    (fallback_todos(&storage), None)
                }
            },
            None => (fallback_todos(&storage), None),
        };
        let mut session = Self {
            todos: Vec::new(),
            filter: Filter::default(),
            priority: Priority::default(),
            storage,
            backend,
        };
        session.set(todos);
        session
    }

    pub fn mode(&self) -> Mode {
        if self.backend.is_some() {
            Mode::Synced
        } else {
            Mode::Offline
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn visible(&self) -> Vec<&Todo> {
        state::filtered(&self.todos, self.filter)
    }

    pub fn stats(&self) -> Stats {
        state::stats(&self.todos)
    }

    /// Returns the stored todo, or `None` when `text` is blank.
    pub fn add(&mut self, text: &str) -> Result<Option<Todo>, ClientError> {
        let previous = self.todos.clone();
        let Some(provisional) = state::new_todo(state::local_id(&previous), text, self.priority.clone()) else {
            return Ok(None);
        };
        self.set(state::add(&previous, provisional.clone()));

        let outcome = self
            .backend
            .as_ref()
            .map(|backend| backend.create(&provisional.text, provisional.priority.clone()));
        match outcome {
            None => Ok(Some(provisional)),
            Some(Ok(created)) => {
                let next = state::replace(&self.todos, provisional.id, &created);
                self.set(next);
                Ok(Some(created))
            }
            Some(Err(err)) => {
                self.rollback(previous, &err);
                Err(err)
            }
        }
    }

    pub fn toggle_complete(&mut self, id: u64) -> Result<(), ClientError> {
        let next = state::toggle_complete(&self.todos, id);
        self.apply_update(id, next, |todo| UpdateRequest {
            completed: Some(todo.completed),
            ..UpdateRequest::default()
        })
    }

    pub fn toggle_priority(&mut self, id: u64) -> Result<(), ClientError> {
        let next = state::toggle_priority(&self.todos, id);
        self.apply_update(id, next, |todo| UpdateRequest {
            priority: Some(todo.priority.clone()),
            ..UpdateRequest::default()
        })
    }

    pub fn edit_text(&mut self, id: u64, text: &str) -> Result<(), ClientError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let next = state::edit_text(&self.todos, id, text);
        self.apply_update(id, next, |todo| UpdateRequest {
            text: Some(todo.text.clone()),
            ..UpdateRequest::default()
        })
    }

    pub fn delete(&mut self, id: u64) -> Result<(), ClientError> {
        if state::find(&self.todos, id).is_none() {
            return Ok(());
        }
        let previous = self.todos.clone();
        self.set(state::delete(&previous, id));

        let outcome = self.backend.as_ref().map(|backend| delete_remote(backend, id));
        match outcome {
            Some(Err(err)) => {
                self.rollback(previous, &err);
                Err(err)
            }
            _ => Ok(()),
        }
    }

    /// Removes every completed todo. When synced, todos whose delete request
    /// failed are put back in their original position.
    pub fn clear_completed(&mut self) -> Result<(), ClientError> {
        let previous = self.todos.clone();
        self.set(state::clear_completed(&previous));

        let Some(backend) = self.backend.as_ref() else {
            return Ok(());
        };
        let mut failed = Vec::new();
        let mut first_error = None;
        for todo in previous.iter().filter(|todo| todo.completed) {
            if let Err(err) = delete_remote(backend, todo.id) {
                failed.push(todo.id);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            None => Ok(()),
            Some(err) => {
                warn!(error = %err, failed = failed.len(), "restoring todos that could not be cleared");
                let restored = previous
                    .into_iter()
                    .filter(|todo| !todo.completed || failed.contains(&todo.id))
                    .collect();
                self.set(restored);
                Err(err)
            }
        }
    }

    fn apply_update(
        &mut self,
        id: u64,
        next: Vec<Todo>,
        patch: impl FnOnce(&Todo) -> UpdateRequest,
    ) -> Result<(), ClientError> {
        let Some(changed) = state::find(&next, id).cloned() else {
            return Ok(());
        };
        let previous = std::mem::replace(&mut self.todos, next);
        self.persist();

        let outcome = self.backend.as_ref().map(|backend| backend.update(id, patch(&changed)));
        match outcome {
            None => Ok(()),
            Some(Ok(updated)) => {
                let next = state::replace(&self.todos, id, &updated);
                self.set(next);
                Ok(())
            }
            Some(Err(err)) => {
                self.rollback(previous, &err);
                Err(err)
            }
        }
    }

    fn rollback(&mut self, previous: Vec<Todo>, err: &ClientError) {
        warn!(error = %err, "service rejected change, rolling back");
        self.set(previous);
    }

    fn set(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save_todos(&self.todos) {
            warn!(error = %err, path = %self.storage.path().display(), "could not persist todos");
        }
    }
}

/// A todo the service no longer knows about is already deleted.
fn delete_remote<B: TodoBackend>(backend: &B, id: u64) -> Result<(), ClientError> {
    match backend.delete(id) {
        Err(ClientError::NotFound(_)) => {
            info!(id, "todo already gone from service");
            Ok(())
        }
        other => other,
    }
}

fn fallback_todos(storage: &LocalStorage) -> Vec<Todo> {
    storage.load_todos().unwrap_or_else(state::seed_todos)
}
