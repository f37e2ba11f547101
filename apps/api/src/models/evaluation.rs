use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EvaluationRow {
    pub id: i64,
    pub candidate_id: String,
    pub created_at: DateTime<Utc>,
    pub overall_percent: f64,
    /// `{judgments, weights, summary}`
    pub details: Value,
    pub resume_context: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct EvaluationListingRow {
    pub id: i64,
    pub candidate_id: String,
    pub created_at: DateTime<Utc>,
    pub overall_percent: f64,
}
