use std::sync::Arc;

use bson::doc;
use mongodb::{Client, Database};
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::infra::repositories::mongo_serviceman_repo::MongoServicemanRepo;
use crate::state::AppState;

/// Establishes the database connection. The driver connects lazily, so a
/// ping forces the handshake and surfaces a bad endpoint here instead of on
/// the first request.
pub async fn connect(config: &Config) -> Result<Database, AppError> {
    let client = Client::with_uri_str(&config.database_url).await?;
    let db = client.database(&config.database_name);
    db.run_command(doc! { "ping": 1 }).await?;

    info!("MongoDB connected");
    Ok(db)
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let db = connect(config).await?;

    Ok(AppState {
        config: config.clone(),
        serviceman_repo: Arc::new(MongoServicemanRepo::new(db)),
    })
}
