//! Result Store — persistence for completed evaluation runs.
//!
//! `ResultStore` is the boundary the orchestrator and handlers depend on;
//! `PgResultStore` is the production backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::models::{
    EvaluationListing, EvaluationResult, Judgment, NewEvaluation, Summary,
};
use crate::models::evaluation::{EvaluationListingRow, EvaluationRow};

/// Maximum number of rows returned by the recent-results listing.
pub const RECENT_RESULTS_LIMIT: i64 = 100;

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Stores a completed run and returns its assigned id.
    async fn save(&self, evaluation: &NewEvaluation) -> Result<i64, AppError>;

    /// Loads a run by id. `Ok(None)` when no such run exists.
    async fn load(&self, id: i64) -> Result<Option<EvaluationResult>, AppError>;

    /// Most recent runs first, at most `limit`.
    async fn list_recent(&self, limit: i64) -> Result<Vec<EvaluationListing>, AppError>;
}

/// Structured part of a run, stored as a single JSONB document.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDetails {
    judgments: Vec<Judgment>,
    weights: BTreeMap<String, f64>,
    summary: Summary,
}

#[derive(Clone)]
pub struct PgResultStore {
    pool: PgPool,
}

impl PgResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn save(&self, evaluation: &NewEvaluation) -> Result<i64, AppError> {
        let details = serde_json::to_value(StoredDetails {
            judgments: evaluation.judgments.clone(),
            weights: evaluation.weights.clone(),
            summary: evaluation.summary.clone(),
        })
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize details: {e}")))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO evaluation_results
                (candidate_id, created_at, overall_percent, details, resume_context)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&evaluation.candidate_id)
        .bind(evaluation.created_at)
        .bind(evaluation.overall_percent)
        .bind(&details)
        .bind(&evaluation.resume_context_text)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Stored evaluation {id} for candidate {}",
            evaluation.candidate_id
        );
        Ok(id)
    }

    async fn load(&self, id: i64) -> Result<Option<EvaluationResult>, AppError> {
        let row = sqlx::query_as::<_, EvaluationRow>(
            "SELECT * FROM evaluation_results WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(result_from_row).transpose()
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<EvaluationListing>, AppError> {
        let rows = sqlx::query_as::<_, EvaluationListingRow>(
            r#"
            SELECT id, candidate_id, created_at, overall_percent
            FROM evaluation_results
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| EvaluationListing {
                id: r.id,
                candidate_id: r.candidate_id,
                created_at: r.created_at,
                overall_percent: r.overall_percent,
            })
            .collect())
    }
}

fn result_from_row(row: EvaluationRow) -> Result<EvaluationResult, AppError> {
    let details: StoredDetails = serde_json::from_value(row.details).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Stored details for evaluation {} are unreadable: {e}",
            row.id
        ))
    })?;

    Ok(EvaluationResult {
        id: row.id,
        candidate_id: row.candidate_id,
        created_at: row.created_at,
        overall_percent: row.overall_percent,
        judgments: details.judgments,
        weights: details.weights,
        summary: details.summary,
        resume_context_text: row.resume_context,
    })
}
