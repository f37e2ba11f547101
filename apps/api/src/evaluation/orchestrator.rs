//! Evaluation Orchestrator — one full pass over the registry for one candidate.
//!
//! Flow: rebuild resume context (audit only) → evaluate each criterion in
//! registry order → aggregate → persist → return.
//!
//! Runs are all-or-nothing: any retrieval, model or store failure aborts the
//! run and nothing is persisted.

use chrono::{SubsecRound, Utc};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::evaluation::aggregate::aggregate;
use crate::evaluation::criteria::CriterionRegistry;
use crate::evaluation::evaluator::{evaluate_criterion, Retriever};
use crate::evaluation::models::{EvaluationResult, NewEvaluation};
use crate::evaluation::prompts::RESUME_CONTEXT_QUERIES;
use crate::evaluation::store::ResultStore;
use crate::llm_client::LanguageModel;

/// Passages per generic query when rebuilding the resume context.
pub const RESUME_CONTEXT_K: usize = 6;
/// Upper bound on stored resume context, in characters.
pub const MAX_STORED_CONTEXT_CHARS: usize = 200_000;
/// `TIMESTAMPTZ` keeps microseconds; the returned result must match what is stored.
const TIMESTAMP_PRECISION_DIGITS: u16 = 6;

pub async fn run_evaluation(
    candidate_id: &str,
    registry: &CriterionRegistry,
    retriever: &dyn Retriever,
    llm: &dyn LanguageModel,
    store: &dyn ResultStore,
) -> Result<EvaluationResult, AppError> {
    info!(
        "Evaluating candidate {candidate_id} against {} criteria",
        registry.criteria().len()
    );

    let resume_context = rebuild_resume_context(candidate_id, retriever).await?;

    let mut judgments = Vec::with_capacity(registry.criteria().len());
    for criterion in registry.criteria() {
        let judgment = evaluate_criterion(candidate_id, criterion, retriever, llm).await?;
        debug!(
            "Criterion '{}' scored {:.2}",
            judgment.criterion_name, judgment.score_percent
        );
        judgments.push(judgment);
    }

    let weights = registry.weights();
    let aggregate = aggregate(&judgments, &weights);
    for detail in &aggregate.details {
        debug!(
            "'{}': {:.2} × {:.2}",
            detail.criterion, detail.score, detail.weight
        );
    }

    let evaluation = NewEvaluation {
        candidate_id: candidate_id.to_string(),
        created_at: Utc::now().trunc_subsecs(TIMESTAMP_PRECISION_DIGITS),
        overall_percent: aggregate.overall_percent,
        judgments,
        weights,
        summary: aggregate.summary,
        resume_context_text: truncate_chars(&resume_context, MAX_STORED_CONTEXT_CHARS).to_string(),
    };

    let id = store.save(&evaluation).await?;
    let result = evaluation.with_id(id);

    info!(
        "Evaluation {} for candidate {candidate_id}: {:.2}% ({:?})",
        result.id, result.overall_percent, result.summary.overall_comment
    );

    Ok(result)
}

/// Concatenates passages for a fixed set of generic queries. Stored for
/// display; never used as scoring context.
async fn rebuild_resume_context(
    candidate_id: &str,
    retriever: &dyn Retriever,
) -> Result<String, AppError> {
    let mut slices = Vec::with_capacity(RESUME_CONTEXT_QUERIES.len());
    for query in RESUME_CONTEXT_QUERIES {
        let passages = retriever
            .retrieve(candidate_id, query, RESUME_CONTEXT_K)
            .await?;
        slices.push(passages.join("\n\n"));
    }
    Ok(slices.join("\n\n"))
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
