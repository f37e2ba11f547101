use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ResumeChunkRow {
    pub ordinal: i32,
    pub content: String,
    pub embedding: Vec<f32>,
}
