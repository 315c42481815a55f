use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/todos`. `text` stays optional so a missing field is
/// reported as a validation error instead of a decoding failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewTodo {
    pub text: Option<String>,
    pub priority: Option<Priority>,
}

/// Body of `PUT /api/todos/:id`. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

/// `en-US` short date, e.g. "Tue, Oct 14".
pub fn short_date(now: DateTime<Local>) -> String {
    now.format("%a, %b %-d").to_string()
}
