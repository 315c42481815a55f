use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{CreateRequest, Priority, Todo, UpdateRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
}

/// The REST contract of the todo service, as seen by the client.
pub trait TodoBackend {
    fn list(&self) -> Result<Vec<Todo>, ClientError>;
    fn create(&self, text: &str, priority: Priority) -> Result<Todo, ClientError>;
    fn update(&self, id: u64, patch: UpdateRequest) -> Result<Todo, ClientError>;
    fn delete(&self, id: u64) -> Result<(), ClientError>;
}

pub struct HTTPClient {
    pub base_url: String,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn todo_url(&self, id: u64) -> String {
        format!("{}/api/todos/{}", self.base_url, id)
    }
}

impl TodoBackend for HTTPClient {
    fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let resp = self.client.get(self.todos_url()).send().map_err(transport)?;
        decode(resp)
    }

    fn create(&self, text: &str, priority: Priority) -> Result<Todo, ClientError> {
        let body = CreateRequest {
            text: text.to_string(),
            priority,
        };
        let resp = self
            .client
            .post(self.todos_url())
            .json(&body)
            .send()
            .map_err(transport)?;
        decode(resp)
    }

    fn update(&self, id: u64, patch: UpdateRequest) -> Result<Todo, ClientError> {
        let resp = self
            .client
            .put(self.todo_url(id))
            .json(&patch)
            .send()
            .map_err(transport)?;
        decode(resp)
    }

    fn delete(&self, id: u64) -> Result<(), ClientError> {
        let resp = self.client.delete(self.todo_url(id)).send().map_err(transport)?;
        decode::<Value>(resp).map(|_| ())
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return resp.json::<T>().map_err(transport);
    }
    let body = resp.text().unwrap_or_default();
    Err(error_for(status, &body))
}

/// Maps a non-2xx response onto the error taxonomy, preferring the server's
/// `{"error": ...}` message when there is one.
pub fn error_for(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string());
    match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Http {
            status: status.as_u16(),
            body: message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_bodies_map_onto_the_taxonomy() {
        assert_eq!(
            error_for(StatusCode::BAD_REQUEST, r#"{"error":"Todo text is required"}"#),
            ClientError::Validation("Todo text is required".to_string())
        );
        assert_eq!(
            error_for(StatusCode::NOT_FOUND, r#"{"error":"Todo not found"}"#),
            ClientError::NotFound("Todo not found".to_string())
        );
        assert_eq!(
            error_for(StatusCode::BAD_GATEWAY, "upstream down"),
            ClientError::Http {
                status: 502,
                body: "upstream down".to_string()
            }
        );
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let patch = UpdateRequest {
            completed: Some(true),
            ..UpdateRequest::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"completed":true}"#);
    }

    #[test]
    fn unreachable_service_is_a_transport_error() {
        let client = HTTPClient::new("http://127.0.0.1:9/", Duration::from_millis(200)).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:9");
        assert!(matches!(client.list(), Err(ClientError::Transport(_))));
    }
}
