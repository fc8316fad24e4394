use std::sync::Arc;

use anime_filter_backend::{
    api::{self, AppState},
    config::AppConfig,
    external::{PassthroughExtractor, UpstreamClient},
    models::FILTER_CATALOGS,
    services::{FilterService, PersonService, ScheduleService},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let client = UpstreamClient::new(
        &config.base_url,
        config.upstream_timeout,
        &config.user_agent,
    )?;
    tracing::info!("Upstream base url: {}", client.base_url());

    let client = Arc::new(client);
    let extractor = Arc::new(PassthroughExtractor);

    let state = AppState::new(
        FilterService::new(&FILTER_CATALOGS, client.clone(), extractor.clone()),
        ScheduleService::new(client.clone(), extractor.clone()),
        PersonService::new(client, extractor),
    );

    let app = api::build_router(state, &config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
