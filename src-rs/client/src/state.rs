//! Pure transitions over the local todo list. Every function takes the
//! current list by reference and returns the next one; nothing is mutated
//! in place.

use chrono::{DateTime, Local, SecondsFormat, Utc};

use crate::models::{Filter, Priority, Stats, Todo};

/// Onboarding tasks used when neither the service nor local storage has a list.
pub fn seed_todos() -> Vec<Todo> {
    let seed = [
        (1, "Welcome to your Todo App!", false, Priority::High, "Today"),
        (2, "Click checkbox to complete tasks", true, Priority::Medium, "Today"),
        (3, "Try adding your own tasks below", false, Priority::Low, "Today"),
        (4, "Double-click to edit any task", false, Priority::Medium, "Today"),
        (5, "Use priority badges to organize", false, Priority::High, "Tomorrow"),
    ];
    seed.into_iter()
        .map(|(id, text, completed, priority, date)| Todo {
            id,
            text: text.to_string(),
            completed,
            priority,
            date: date.to_string(),
            created_at: None,
        })
        .collect()
}

pub fn short_date(now: DateTime<Local>) -> String {
    now.format("%a, %b %-d").to_string()
}

/// A todo stamped with the current date, or `None` for blank text.
pub fn new_todo(id: u64, text: &str, priority: Priority) -> Option<Todo> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Todo {
        id,
        text: text.to_string(),
        completed: false,
        priority,
        date: short_date(Local::now()),
        created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    })
}

/// Epoch milliseconds, bumped past every id already in `todos`.
pub fn local_id(todos: &[Todo]) -> u64 {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    let max = todos.iter().map(|todo| todo.id).max().unwrap_or(0);
    now.max(max.saturating_add(1))
}

pub fn add(todos: &[Todo], todo: Todo) -> Vec<Todo> {
    let mut next = Vec::with_capacity(todos.len() + 1);
    next.push(todo);
    next.extend_from_slice(todos);
    next
}

pub fn toggle_complete(todos: &[Todo], id: u64) -> Vec<Todo> {
    map_one(todos, id, |todo| todo.completed = !todo.completed)
}

/// High drops to medium, anything else is raised to high.
pub fn toggle_priority(todos: &[Todo], id: u64) -> Vec<Todo> {
    map_one(todos, id, |todo| todo.priority = next_priority(&todo.priority))
}

pub fn next_priority(priority: &Priority) -> Priority {
    if *priority == Priority::High {
        Priority::Medium
    } else {
        Priority::High
    }
}

pub fn edit_text(todos: &[Todo], id: u64, text: &str) -> Vec<Todo> {
    let text = text.trim();
    if text.is_empty() {
        return todos.to_vec();
    }
    map_one(todos, id, |todo| todo.text = text.to_string())
}

pub fn delete(todos: &[Todo], id: u64) -> Vec<Todo> {
    todos.iter().filter(|todo| todo.id != id).cloned().collect()
}

pub fn clear_completed(todos: &[Todo]) -> Vec<Todo> {
    todos.iter().filter(|todo| !todo.completed).cloned().collect()
}

/// Replaces the todo with `id` by `todo`, keeping its position.
pub fn replace(todos: &[Todo], id: u64, todo: &Todo) -> Vec<Todo> {
    todos
        .iter()
        .map(|current| if current.id == id { todo.clone() } else { current.clone() })
        .collect()
}

pub fn find(todos: &[Todo], id: u64) -> Option<&Todo> {
    todos.iter().find(|todo| todo.id == id)
}

pub fn filtered(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}

pub fn stats(todos: &[Todo]) -> Stats {
    let total = todos.len();
    let completed = todos.iter().filter(|todo| todo.completed).count();
    Stats {
        total,
        completed,
        remaining: total - completed,
        percentage: completion_percentage(completed, total),
    }
}

pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

fn map_one(todos: &[Todo], id: u64, apply: impl Fn(&mut Todo)) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| {
            let mut todo = todo.clone();
            if todo.id == id {
                apply(&mut todo);
            }
            todo
        })
        .collect()
}
