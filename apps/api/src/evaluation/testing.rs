//! In-memory fakes for the evaluation collaborators (testing only).

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::SubsecRound;

use crate::errors::AppError;
use crate::evaluation::evaluator::Retriever;
use crate::evaluation::models::{EvaluationListing, EvaluationResult, NewEvaluation};
use crate::evaluation::store::ResultStore;
use crate::llm_client::{Embedder, LanguageModel, LlmError};

// ────────────────────────────────────────────────────────────────────────────
// StaticRetriever
// ────────────────────────────────────────────────────────────────────────────

/// Returns the same passages (truncated to `k`) for every query and records calls.
#[derive(Debug, Default)]
pub struct StaticRetriever {
    passages: Vec<String>,
    fail: bool,
    calls: Mutex<Vec<(String, String, usize)>>,
}

impl StaticRetriever {
    pub fn with_passages(passages: &[&str]) -> Self {
        Self {
            passages: passages.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(candidate_id, query, k)` per call, in order.
    pub fn calls(&self) -> Vec<(String, String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    async fn retrieve(
        &self,
        candidate_id: &str,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((candidate_id.to_string(), query.to_string(), k));
        if self.fail {
            return Err(AppError::Retrieval("vector index unavailable".to_string()));
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}

/// Per-candidate passages; unknown candidates have none.
#[derive(Debug, Default)]
pub struct CandidateRetriever {
    passages: HashMap<String, Vec<String>>,
}

impl CandidateRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate(mut self, candidate_id: &str, passages: &[&str]) -> Self {
        self.passages.insert(
            candidate_id.to_string(),
            passages.iter().map(|p| p.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl Retriever for CandidateRetriever {
    async fn retrieve(
        &self,
        candidate_id: &str,
        _query: &str,
        k: usize,
    ) -> Result<Vec<String>, AppError> {
        tokio::task::yield_now().await;
        Ok(self
            .passages
            .get(candidate_id)
            .map(|p| p.iter().take(k).cloned().collect())
            .unwrap_or_default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Model fakes
// ────────────────────────────────────────────────────────────────────────────

/// Answers with the response whose key appears in the user prompt, or the default.
#[derive(Debug, Default)]
pub struct ScriptedLanguageModel {
    by_marker: Vec<(String, String)>,
    default: String,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedLanguageModel {
    pub fn always(response: &str) -> Self {
        Self {
            default: response.to_string(),
            ..Self::default()
        }
    }

    pub fn by_requirement(responses: &[(&str, &str)]) -> Self {
        Self {
            by_marker: responses
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// `(system, user)` per call, in order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        let response = self
            .by_marker
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.default.clone());
        Ok(response)
    }
}

pub struct FailingLanguageModel;

#[async_trait]
impl LanguageModel for FailingLanguageModel {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "model is loading".to_string(),
        })
    }
}

/// Returns the same unit vector for every input.
pub struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        Ok(vec![1.0, 0.0, 0.0])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryResultStore
// ────────────────────────────────────────────────────────────────────────────

/// In-memory result store assigning sequential ids from 1. Timestamps are
/// truncated to microseconds on save, as `TIMESTAMPTZ` does.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: Mutex<BTreeMap<i64, EvaluationResult>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn save(&self, evaluation: &NewEvaluation) -> Result<i64, AppError> {
        let mut results = self.results.lock().unwrap();
        let id = results.keys().next_back().copied().unwrap_or(0) + 1;
        let mut stored = evaluation.clone().with_id(id);
        stored.created_at = stored.created_at.trunc_subsecs(6);
        results.insert(id, stored);
        Ok(id)
    }

    async fn load(&self, id: i64) -> Result<Option<EvaluationResult>, AppError> {
        Ok(self.results.lock().unwrap().get(&id).cloned())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<EvaluationListing>, AppError> {
        Ok(self
            .results
            .lock()
            .unwrap()
            .values()
            .rev()
            .take(limit.max(0) as usize)
            .map(|r| EvaluationListing {
                id: r.id,
                candidate_id: r.candidate_id.clone(),
                created_at: r.created_at,
                overall_percent: r.overall_percent,
            })
            .collect())
    }
}
