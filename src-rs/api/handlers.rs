use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::todo::{NewTodo, Todo, TodoPatch, TodoStore};

pub type SharedStore = Arc<TodoStore>;

pub async fn handle_info() -> Json<Value> {
    Json(json!({
        "message": "Todo API is running!",
        "endpoints": {
            "getTodos": "GET /api/todos",
            "addTodo": "POST /api/todos",
            "updateTodo": "PUT /api/todos/:id",
            "deleteTodo": "DELETE /api/todos/:id"
        }
    }))
}

pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "ok", "timestamp": Utc::now().to_rfc3339()}))
}

pub async fn handle_list(State(store): State<SharedStore>) -> Json<Vec<Todo>> {
    Json(store.list())
}

pub async fn handle_create(
    State(store): State<SharedStore>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = payload?;
    let todo = store.create(input)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn handle_update(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = payload?;
    Ok(Json(store.update(id, patch)?))
}

pub async fn handle_delete(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id)?;
    store.delete(id)?;
    Ok(Json(json!({"success": true, "message": "Todo deleted"})))
}

/// Reads the id the way `parseInt` does: leading whitespace skipped, then
/// the leading digits. Anything without digits can never match a todo.
pub fn parse_id(raw: &str) -> Result<u64, ApiError> {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse::<u64>().map_err(|_| ApiError::not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_takes_leading_digits() {
        assert_eq!(parse_id("12"), Ok(12));
        assert_eq!(parse_id("1abc"), Ok(1));
        assert_eq!(parse_id(" 7"), Ok(7));
        assert_eq!(parse_id("3.5"), Ok(3));
    }

    #[test]
    fn parse_id_without_digits_is_not_found() {
        for raw in ["abc", "", "-1", "+", "99999999999999999999999"] {
            assert_eq!(parse_id(raw), Err(ApiError::not_found()));
        }
    }
}
