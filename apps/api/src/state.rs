use std::sync::Arc;

use crate::config::Config;
use crate::evaluation::criteria::CriterionRegistry;
use crate::evaluation::evaluator::Retriever;
use crate::evaluation::store::ResultStore;
use crate::ingest::index::ChunkIndex;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only for the lifetime of the process.
    pub registry: Arc<CriterionRegistry>,
    pub llm: Arc<dyn LanguageModel>,
    /// Evidence source for evaluation. In production this is `index`.
    pub retriever: Arc<dyn Retriever>,
    pub store: Arc<dyn ResultStore>,
    /// Write side of ingestion.
    pub index: Arc<ChunkIndex>,
}
