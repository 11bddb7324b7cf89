use sqlx::{PgConnection, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::pkg::internal::adaptors::quizzes::spec::{
    CreateQuizInput, PatchQuizInput, QUIZ_COLUMNS, QuizEntry,
};
use crate::prelude::Result;

pub struct QuizMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> QuizMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        QuizMutator { pool }
    }

    pub async fn create(&mut self, quiz: CreateQuizInput, creator: Uuid) -> Result<QuizEntry> {
        let row = sqlx::query_as::<_, QuizEntry>(&format!(
            r#"
            INSERT INTO quizzes (id, title, description, creator, questions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {QUIZ_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(quiz.title.trim())
        .bind(&quiz.description)
        .bind(creator)
        .bind(Json(&quiz.questions))
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: Uuid, quiz: PatchQuizInput) -> Result<Option<QuizEntry>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE quizzes SET updated_at = NOW()");
        if let Some(title) = quiz.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = quiz.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(questions) = quiz.questions {
            qb.push(", questions = ").push_bind(Json(questions));
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {QUIZ_COLUMNS}"));
        let row = qb
            .build_query_as::<QuizEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM quizzes")
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
