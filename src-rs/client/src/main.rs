mod cli;
mod client;
mod models;
mod render;
mod repl;
mod session;
mod state;
mod storage;

use client::HTTPClient;
use repl::REPL;
use session::TodoSession;
use storage::LocalStorage;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Tracing targets are module paths, which start with the binary's crate name.
const DEFAULT_LOG_FILTER: &str = concat!(env!("CARGO_CRATE_NAME"), "=warn");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli::parse_config();
    let backend = if config.offline {
        None
    } else {
        match HTTPClient::new(&config.base_url, config.timeout) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "could not build http client");
                None
            }
        }
    };
    let storage = LocalStorage::new(config.storage_path.clone());
    let session = TodoSession::start(backend, storage);
    let mut repl = REPL::new(config, session);
    repl.run();
}
