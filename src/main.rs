// Meeting Tool API server entry point

use std::sync::Arc;

use anyhow::{Context, Result};

use meeting_tool::api::{self, ApiState};
use meeting_tool::config::AppConfig;
use meeting_tool::database::DatabaseManager;
use meeting_tool::generation::{GenerationCache, GenerationGateway, OpenAiProvider};
use meeting_tool::transfer::{ObjectStorePrefix, S3TransferProvider};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // All configuration and client construction happens here, up front, so a
    // misconfigured deployment fails at startup rather than mid-request.
    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = Arc::new(DatabaseManager::new(config.database_path.clone())?);

    let cache = Arc::new(GenerationCache::with_default_ttl());
    let provider = Arc::new(OpenAiProvider::new(config.generation.clone()));
    let generation = Arc::new(GenerationGateway::new(provider, cache));

    let transfer = Arc::new(S3TransferProvider::new(&config.transfer).await);
    let object_store = ObjectStorePrefix::new(&config.transfer);

    let state = ApiState {
        db,
        generation,
        transfer,
        object_store,
    };

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    log::info!("meeting-tool API listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
