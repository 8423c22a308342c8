use std::sync::Arc;

use gamehub_intel::{
    config::{Config, SummaryStoreKind},
    create_router,
    db::{
        create_pool, create_redis_client, Cache, CacheWriterHandle, MemorySummaryStore,
        PgCatalogStore, PgSummaryStore, RedisSummaryStore, SummaryStore,
    },
    services::OpenAiGenerator,
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let catalog = Arc::new(PgCatalogStore::new(pool.clone()));

    let mut cache_writer: Option<CacheWriterHandle> = None;
    let summaries: Arc<dyn SummaryStore> = match config.summary_store {
        SummaryStoreKind::Postgres => Arc::new(PgSummaryStore::new(pool)),
        SummaryStoreKind::Redis => {
            let client = create_redis_client(&config.redis_url)?;
            let (cache, handle) = Cache::new(client).await;
            cache_writer = Some(handle);
            Arc::new(RedisSummaryStore::new(cache))
        }
        SummaryStoreKind::Memory => Arc::new(MemorySummaryStore::new()),
    };

    let generator = Arc::new(OpenAiGenerator::new(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
    ));

    let state = AppState::new(catalog, generator).with_summary_store(summaries);

    if let Err(e) = state.title_index.refresh(state.catalog.as_ref()).await {
        tracing::warn!(error = %e, "Failed to load game title index, chat starts without it");
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        summary_store = ?config.summary_store,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
