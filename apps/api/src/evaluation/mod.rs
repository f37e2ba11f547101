// Candidate evaluation pipeline.
// Registry → (evaluator × criteria) → interpreter → normalizer → aggregator → store.
// All model calls go through llm_client; all evidence comes through a Retriever.

pub mod aggregate;
pub mod criteria;
pub mod evaluator;
pub mod handlers;
pub mod interpreter;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod store;

#[cfg(test)]
pub mod testing;
