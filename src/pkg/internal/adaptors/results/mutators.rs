use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::results::spec::ResultEntry;
use crate::prelude::Result;

pub struct ResultMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResultMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResultMutator { pool }
    }

    pub async fn create(
        &mut self,
        user_id: Uuid,
        quiz_id: Uuid,
        score: i32,
        total_questions: i32,
    ) -> Result<ResultEntry> {
        let row = sqlx::query_as::<_, ResultEntry>(
            r#"
            INSERT INTO quiz_results (id, user_id, quiz_id, score, total_questions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, quiz_id, score, total_questions, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(quiz_id)
        .bind(score)
        .bind(total_questions)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
