use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResultEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub created_at: DateTime<Utc>,
}

/// Returned once a submission is graded, so the taker can review the key.
#[derive(Debug, Serialize)]
pub struct GradedSubmission {
    #[serde(flatten)]
    pub result: ResultEntry,
    pub correct_answers: Vec<i32>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct MyResult {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub result: ResultEntry,
    pub quiz_title: String,
}
