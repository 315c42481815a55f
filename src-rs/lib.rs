pub mod config;
pub mod helpers;

#[path = "todo/lib.rs"]
pub mod todo;
#[path = "api/lib.rs"]
pub mod api;

pub use config::ServerConfig;
pub use crate::api::{ApiError, TodoServer};
pub use crate::todo::{NewTodo, Priority, StoreError, Todo, TodoPatch, TodoStore};
