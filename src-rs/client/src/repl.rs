use std::io;

use crate::client::{ClientError, TodoBackend};
use crate::models::{ClientConfig, Filter, Priority};
use crate::render;
use crate::session::TodoSession;
use crate::state;

pub struct REPL<B> {
    pub config: ClientConfig,
    pub session: TodoSession<B>,
}

impl<B: TodoBackend> REPL<B> {
    pub fn new(config: ClientConfig, session: TodoSession<B>) -> Self {
        Self { config, session }
    }

    pub fn run(&mut self) {
        render::banner(&self.config, self.session.mode());
        self.show();
        loop {
            render::prompt(&self.session.priority);
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(line) {
                    break;
                }
                continue;
            }
            match self.session.add(line) {
                Ok(_) => self.show(),
                Err(err) => report(&err),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "list" => self.show(),
            "stats" => render::stats(&self.session.stats()),
            "done" => self.with_id(rest, |session, id| session.toggle_complete(id)),
            "star" => self.with_id(rest, |session, id| session.toggle_priority(id)),
            "rm" => self.with_id(rest, |session, id| session.delete(id)),
            "edit" => {
                let mut args = rest.splitn(2, ' ');
                let id = args.next().unwrap_or("");
                let text = args.next().unwrap_or("").to_string();
                self.with_id(id, move |session, id| session.edit_text(id, &text));
            }
            "clear" => match self.session.clear_completed() {
                Ok(()) => self.show(),
                Err(err) => report(&err),
            },
            "filter" => match Filter::from_id(rest) {
                Some(filter) => {
                    self.session.filter = filter;
                    self.show();
                }
                None => render::error("filter must be one of all, active, completed, high"),
            },
            "priority" => match Priority::from_label(rest) {
                Some(priority) => {
                    render::info(&format!("new tasks get {} priority", priority.as_str()));
                    self.session.priority = priority;
                }
                None => render::error("priority must be one of low, medium, high"),
            },
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    fn with_id(
        &mut self,
        raw: &str,
        action: impl FnOnce(&mut TodoSession<B>, u64) -> Result<(), ClientError>,
    ) {
        let Ok(id) = raw.trim().parse::<u64>() else {
            render::error("expected a task id");
            return;
        };
        if state::find(self.session.todos(), id).is_none() {
            render::error(&format!("no task with id {}", id));
            return;
        }
        match action(&mut self.session, id) {
            Ok(()) => self.show(),
            Err(err) => report(&err),
        }
    }

    fn show(&self) {
        render::todos(self.session.filter, &self.session.visible());
        render::stats(&self.session.stats());
    }
}

fn report(err: &ClientError) {
    render::error(&err.to_string());
}
