use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::quizzes::spec::{QuizEntry, QuizSummary};
use crate::prelude::Result;

pub struct QuizSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> QuizSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        QuizSelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<QuizSummary>> {
        let rows = sqlx::query_as::<_, QuizSummary>(
            r#"
            SELECT q.id, q.title, q.description, q.creator, u.name AS creator_name,
                   jsonb_array_length(q.questions) AS question_count, q.created_at
            FROM quizzes q LEFT JOIN users u ON u.id = q.creator
            ORDER BY q.created_at DESC
            "#,
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&mut self, id: Uuid) -> Result<Option<QuizEntry>> {
        let row = sqlx::query_as::<_, QuizEntry>(
            r#"
            SELECT q.id, q.title, q.description, q.creator, q.questions, q.created_at,
                   q.updated_at, u.name AS creator_name
            FROM quizzes q LEFT JOIN users u ON u.id = q.creator
            WHERE q.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
