pub mod store;
pub mod types;

pub use store::{StoreError, TodoStore};
pub use types::{short_date, NewTodo, Priority, Todo, TodoPatch};
