use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured outcome of evaluating one criterion for one candidate.
/// Built once by the response interpreter and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub criterion_name: String,
    /// Always within `[0, 100]`.
    pub score_percent: f64,
    pub rationale: String,
    pub alternate_considerations: Vec<String>,
}

/// Qualitative verdict derived from the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    #[serde(rename = "Strong match")]
    Strong,
    #[serde(rename = "Moderate match")]
    Moderate,
    #[serde(rename = "Weak match")]
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Criteria scoring at or above the strength threshold.
    pub strengths: Vec<String>,
    /// Criteria scoring below it.
    pub gaps: Vec<String>,
    pub overall_comment: MatchVerdict,
}

/// A completed evaluation run, before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvaluation {
    pub candidate_id: String,
    pub created_at: DateTime<Utc>,
    pub overall_percent: f64,
    pub judgments: Vec<Judgment>,
    pub weights: BTreeMap<String, f64>,
    pub summary: Summary,
    pub resume_context_text: String,
}

impl NewEvaluation {
    pub fn with_id(self, id: i64) -> EvaluationResult {
        EvaluationResult {
            id,
            candidate_id: self.candidate_id,
            created_at: self.created_at,
            overall_percent: self.overall_percent,
            judgments: self.judgments,
            weights: self.weights,
            summary: self.summary,
            resume_context_text: self.resume_context_text,
        }
    }
}

/// A persisted evaluation run. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub id: i64,
    pub candidate_id: String,
    pub created_at: DateTime<Utc>,
    pub overall_percent: f64,
    pub judgments: Vec<Judgment>,
    pub weights: BTreeMap<String, f64>,
    pub summary: Summary,
    pub resume_context_text: String,
}

/// Row of the recent-results listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationListing {
    pub id: i64,
    pub candidate_id: String,
    pub created_at: DateTime<Utc>,
    pub overall_percent: f64,
}
