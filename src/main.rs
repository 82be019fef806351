use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use staygenie::application::ports::{Clock, ConversationStore};
use staygenie::application::services::ConversationSweeper;
use staygenie::infrastructure::clock::SystemClock;
use staygenie::infrastructure::hotel_data::LiteApiClient;
use staygenie::infrastructure::llm::create_llm_client;
use staygenie::infrastructure::observability::{TracingConfig, init_tracing};
use staygenie::infrastructure::persistence::InMemoryConversationStore;
use staygenie::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)
        .context("Failed to parse APP_ENVIRONMENT")?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    if settings.llm.api_key.trim().is_empty() {
        tracing::warn!("No model API key configured; refinements will use the rule-based fallback");
    }
    if settings.hotel_data.api_key.trim().is_empty() {
        tracing::warn!("No hotel data API key configured; hotel endpoints will return 503");
    }

    let llm_client = Arc::new(create_llm_client(&settings.llm)?);
    let hotel_data = Arc::new(LiteApiClient::new(&settings.hotel_data)?);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let conversation_store: Arc<dyn ConversationStore> =
        Arc::new(InMemoryConversationStore::new(Arc::clone(&clock)));

    let shutdown = CancellationToken::new();
    let sweeper = ConversationSweeper::new(
        Arc::clone(&conversation_store),
        clock,
        settings.conversation_ttl(),
        settings.sweep_interval(),
    )
    .spawn(shutdown.clone());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host or port")?;

    let state = AppState::new(settings, llm_client, conversation_store, hotel_data);
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let signal_token = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
            signal_token.cancel();
        })
        .await?;

    shutdown.cancel();
    sweeper.await?;

    Ok(())
}
