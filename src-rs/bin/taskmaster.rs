use taskmaster_rs::{ServerConfig, TodoServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskmaster_rs=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let server = TodoServer::new(config, None);
    println!("taskmaster listening on http://{}/api/todos", server.config.addr());
    server.start().await
}
