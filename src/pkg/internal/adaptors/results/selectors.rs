use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::results::spec::MyResult;
use crate::prelude::Result;

pub struct ResultSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResultSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResultSelector { pool }
    }

    pub async fn for_user(&mut self, user_id: Uuid) -> Result<Vec<MyResult>> {
        let rows = sqlx::query_as::<_, MyResult>(
            r#"
            SELECT r.id, r.user_id, r.quiz_id, r.score, r.total_questions, r.created_at,
                   q.title AS quiz_title
            FROM quiz_results r JOIN quizzes q ON q.id = r.quiz_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
