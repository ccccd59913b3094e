use marketplace_backend::{config::Config, setup};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    if let Err(e) = setup::run_setup(&config).await {
        error!("Database setup failed: {}", e);
        std::process::exit(1);
    }
}
