use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::api::error::ApiError;

const REJECTED_ORIGIN: &str =
    "The CORS policy for this site does not allow access from the specified Origin.";

/// Explicit allow-list of browser origins. Requests without an `Origin`
/// header (curl, native clients) always pass.
#[derive(Clone, Debug)]
pub struct OriginPolicy {
    allowed: Arc<Vec<String>>,
}

impl OriginPolicy {
    pub fn new(origins: &[String]) -> Self {
        Self {
            allowed: Arc::new(origins.to_vec()),
        }
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.iter().any(|allowed| allowed == origin),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let mut values = Vec::new();
        for origin in self.allowed.iter() {
            match HeaderValue::from_str(origin) {
                Ok(value) => values.push(value),
                Err(_) => warn!(origin = origin.as_str(), "ignoring malformed allowed origin"),
            }
        }
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(values))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true)
    }
}

/// Rejects requests whose `Origin` is not on the allow-list before they
/// reach a handler.
pub async fn reject_disallowed_origin<B>(
    State(policy): State<OriginPolicy>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .map(|value| value.to_str().unwrap_or_default().to_string());
    if policy.is_allowed(origin.as_deref()) {
        return next.run(request).await;
    }
    warn!(origin = origin.as_deref().unwrap_or_default(), "rejected cross-origin request");
    ApiError::new(StatusCode::FORBIDDEN, REJECTED_ORIGIN).into_response()
}
