//! Criterion Evaluator — retrieve, prompt, complete, interpret for a single criterion.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::evaluation::criteria::Criterion;
use crate::evaluation::interpreter::interpret_response;
use crate::evaluation::models::Judgment;
use crate::evaluation::prompts::{build_evaluation_prompt, EVALUATION_SYSTEM};
use crate::llm_client::LanguageModel;

/// Passages retrieved as evidence for each criterion.
pub const CRITERION_CONTEXT_K: usize = 8;

/// Per-candidate passage search.
///
/// Must return at most `k` passages, best first. An empty result means
/// "no evidence" and is not an error.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(
        &self,
        candidate_id: &str,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, AppError>;
}

/// Evaluates one criterion. Retrieval and model failures propagate; a bad
/// model response does not.
pub async fn evaluate_criterion(
    candidate_id: &str,
    criterion: &Criterion,
    retriever: &dyn Retriever,
    llm: &dyn LanguageModel,
) -> Result<Judgment, AppError> {
    let passages = retriever
        .retrieve(candidate_id, &criterion.retrieval_query, CRITERION_CONTEXT_K)
        .await?;
    debug!(
        "Retrieved {} passages for '{}' (candidate {candidate_id})",
        passages.len(),
        criterion.name
    );

    let context = passages.join("\n\n");
    let prompt = build_evaluation_prompt(&context, &criterion.requirement);

    let raw = llm
        .complete(EVALUATION_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Evaluation of '{}' failed: {e}", criterion.name)))?;

    Ok(interpret_response(&raw, criterion))
}
