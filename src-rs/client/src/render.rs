use std::io::{self, Write};

use crate::models::{ClientConfig, Filter, Priority, Stats, Todo};
use crate::session::Mode;

pub fn banner(cfg: &ClientConfig, mode: Mode) {
    println!("TaskMaster Pro");
    println!("Organize your life, one task at a time");
    match mode {
        Mode::Synced => println!("API: {}", cfg.base_url),
        Mode::Offline => println!("Offline, saving to {}", cfg.storage_path.display()),
    }
    println!("Type /help for commands, plain text adds a task.");
}

pub fn prompt(priority: &Priority) {
    print!("[{}] > ", priority.as_str());
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  <text>                 Add a task with the selected priority");
    println!("  /list                  Show tasks for the current filter");
    println!("  /done <id>             Toggle complete");
    println!("  /star <id>             Toggle high priority");
    println!("  /edit <id> <text>      Replace task text");
    println!("  /rm <id>               Delete a task");
    println!("  /clear                 Clear completed tasks");
    println!("  /filter <all|active|completed|high>");
    println!("  /priority <low|medium|high>");
    println!("  /stats                 Show counts");
    println!("  /help                  Show commands");
    println!("  /exit | /quit          Exit");
}

/// Unknown labels are shown as medium.
pub fn priority_badge(priority: &Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Low => "Low",
        Priority::Medium | Priority::Other(_) => "Medium",
    }
}

pub fn todos(filter: Filter, items: &[&Todo]) {
    println!("{}", filter.label());
    if items.is_empty() {
        println!("  {}", empty_message(filter));
        return;
    }
    for todo in items {
        let check = if todo.completed { "x" } else { " " };
        println!(
            "  [{}] {:>13}  {:<6}  {}  ({})",
            check,
            todo.id,
            priority_badge(&todo.priority),
            todo.text,
            todo.date
        );
    }
}

pub fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet. Add one above!",
        Filter::Active => "No active tasks. Time to relax!",
        Filter::Completed => "No completed tasks yet.",
        Filter::High => "No high priority tasks.",
    }
}

pub fn stats(stats: &Stats) {
    println!(
        "Total {}  Remaining {}  Completed {}  Progress {}%",
        stats.total, stats.remaining, stats.completed, stats.percentage
    );
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_priority_renders_as_medium() {
        assert_eq!(priority_badge(&Priority::High), "High");
        assert_eq!(priority_badge(&Priority::Low), "Low");
        assert_eq!(priority_badge(&Priority::Other("urgent".to_string())), "Medium");
        assert_eq!(priority_badge(&Priority::from("".to_string())), "Medium");
    }
}
