use std::sync::Arc;

use anyhow::Context;
use axum::middleware;
use axum::routing::{get, put};
use axum::Router;
use tracing::info;

use crate::api::cors::{reject_disallowed_origin, OriginPolicy};
use crate::api::handlers::{
    handle_create, handle_delete, handle_health, handle_info, handle_list, handle_update, SharedStore,
};
use crate::config::ServerConfig;
use crate::todo::TodoStore;

pub struct TodoServer {
    pub config: ServerConfig,
    pub store: SharedStore,
}

impl TodoServer {
    pub fn new(config: ServerConfig, store: Option<SharedStore>) -> Self {
        let store = store.unwrap_or_else(|| Arc::new(TodoStore::new()));
        Self { config, store }
    }

    pub fn router(&self) -> Router {
        let policy = OriginPolicy::new(&self.config.allowed_origins);
        Router::new()
            .route("/api", get(handle_info))
            .route("/api/health", get(handle_health))
            .route("/api/todos", get(handle_list).post(handle_create))
            .route("/api/todos/:id", put(handle_update).delete(handle_delete))
            .with_state(self.store.clone())
            .layer(policy.cors_layer())
            .layer(middleware::from_fn_with_state(policy, reject_disallowed_origin))
    }

    pub async fn start(&self) -> anyhow::Result<()> {
        let addr = self.config.addr();
        info!(%addr, origins = ?self.config.allowed_origins, "todo api listening");
        axum::Server::try_bind(&addr)
            .with_context(|| format!("binding {}", addr))?
            .serve(self.router().into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("serving todo api")
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
