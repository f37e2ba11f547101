//! Chunk Index — per-candidate resume chunks with embeddings, searched by cosine similarity.
//!
//! Each candidate is its own namespace (`candidate_id` column); a search only
//! ever scores that candidate's chunks.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::evaluation::evaluator::Retriever;
use crate::llm_client::Embedder;
use crate::models::chunk::ResumeChunkRow;

#[derive(Clone)]
pub struct ChunkIndex {
    pool: PgPool,
    embedder: Arc<dyn Embedder>,
}

impl ChunkIndex {
    pub fn new(pool: PgPool, embedder: Arc<dyn Embedder>) -> Self {
        Self { pool, embedder }
    }

    /// Embeds and stores `chunks` for a candidate in one transaction.
    /// Returns the number of chunks written.
    pub async fn index(&self, candidate_id: &str, chunks: &[String]) -> Result<usize, AppError> {
        let mut embeddings = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let embedding = self
                .embedder
                .embed(chunk)
                .await
                .map_err(|e| AppError::Llm(format!("Chunk embedding failed: {e}")))?;
            embeddings.push(embedding);
        }

        let mut tx = self.pool.begin().await?;
        for (ordinal, (chunk, embedding)) in chunks.iter().zip(&embeddings).enumerate() {
            sqlx::query(
                r#"
                INSERT INTO resume_chunks (candidate_id, ordinal, content, embedding)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(candidate_id)
            .bind(ordinal as i32)
            .bind(chunk)
            .bind(embedding)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!("Indexed {} chunks for candidate {candidate_id}", chunks.len());
        Ok(chunks.len())
    }
}

#[async_trait]
impl Retriever for ChunkIndex {
    async fn retrieve(
        &self,
        candidate_id: &str,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query_as::<_, ResumeChunkRow>(
            "SELECT ordinal, content, embedding FROM resume_chunks WHERE candidate_id = $1 ORDER BY ordinal",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Retrieval(format!("Chunk lookup failed: {e}")))?;

        if rows.is_empty() || k == 0 {
            debug!("No chunks for candidate {candidate_id}");
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| AppError::Retrieval(format!("Query embedding failed: {e}")))?;

        Ok(rank_chunks(&query_embedding, rows, k))
    }
}

/// Top-`k` chunk contents by similarity to `query`; ties keep document order.
fn rank_chunks(query: &[f32], rows: Vec<ResumeChunkRow>, k: usize) -> Vec<String> {
    let mut scored: Vec<(f32, ResumeChunkRow)> = rows
        .into_iter()
        .map(|row| (cosine_similarity(query, &row.embedding), row))
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then(a.ordinal.cmp(&b.ordinal))
    });

    scored
        .into_iter()
        .take(k)
        .map(|(_, row)| row.content)
        .collect()
}

/// 0.0 for mismatched dimensions or zero-norm vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
