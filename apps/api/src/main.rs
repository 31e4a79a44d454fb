mod analysis;
mod catalog;
mod config;
mod errors;
mod llm_client;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ats::LlmAtsScorer;
use crate::analysis::cleaning::{LlmTextCleaner, TextCleaner};
use crate::analysis::skills::LlmSkillExtractor;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::recommendation::resources::ResourceFetcher;
use crate::recommendation::service::RecommendationService;
use crate::recommendation::youtube::YouTubeSearch;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Placement API v{}", env!("CARGO_PKG_VERSION"));

    // Load the role catalog — no catalog, no service
    let catalog = Catalog::from_path(&config.catalog_path).with_context(|| {
        format!(
            "failed to load role catalog from {}",
            config.catalog_path.display()
        )
    })?;
    info!(
        roles = catalog.entries().len(),
        vocabulary = catalog.vocabulary_size(),
        "Role catalog loaded"
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?
        .with_api_url(config.anthropic_api_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let cleaner: Arc<dyn TextCleaner> = Arc::new(LlmTextCleaner(llm.clone()));

    let fetch_config = config.fetch_config();
    info!(
        max_results = fetch_config.max_results_per_skill,
        timeout_ms = fetch_config.per_request_timeout.as_millis() as u64,
        concurrency = fetch_config.concurrency,
        "Resource fetcher configured"
    );
    let fetcher = ResourceFetcher::new(
        Arc::new(YouTubeSearch::new(config.youtube_api_key.clone())),
        fetch_config,
    );

    let recommender = Arc::new(RecommendationService::new(
        catalog,
        Arc::clone(&cleaner),
        fetcher,
    ));

    // Build app state
    let state = AppState {
        recommender,
        cleaner,
        skill_extractor: Arc::new(LlmSkillExtractor(llm.clone())),
        ats_scorer: Arc::new(LlmAtsScorer(llm)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
