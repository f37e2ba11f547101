mod config;
mod db;
mod errors;
mod evaluation;
mod ingest;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::evaluation::criteria::CriterionRegistry;
use crate::evaluation::store::PgResultStore;
use crate::ingest::index::ChunkIndex;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shortlist API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(&config).context("Failed to build LLM client")?);
    info!(
        "LLM client initialized (model: {}, embeddings: {}, host: {})",
        llm.model(),
        llm.embed_model(),
        config.ollama_host
    );

    // Criteria are fixed for the lifetime of the process
    let registry = match &config.criteria_path {
        Some(path) => CriterionRegistry::from_json_file(path)
            .with_context(|| format!("Invalid criteria file {}", path.display()))?,
        None => CriterionRegistry::default(),
    };
    for criterion in registry.criteria() {
        info!("Criterion '{}' (weight {:.2})", criterion.name, criterion.weight);
    }

    let index = Arc::new(ChunkIndex::new(db.clone(), llm.clone()));

    // Build app state
    let state = AppState {
        config: config.clone(),
        registry: Arc::new(registry),
        llm,
        retriever: index.clone(),
        store: Arc::new(PgResultStore::new(db)),
        index,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the recruiter UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
