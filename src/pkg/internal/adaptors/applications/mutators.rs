use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::applications::spec::{
    APPLICATION_COLUMNS, ApplicationEntry, ApplicationStatus,
};
use crate::prelude::{ApiError, Result};

pub struct ApplicationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationMutator { pool }
    }

    pub async fn create(
        &mut self,
        job_id: Uuid,
        user_id: Uuid,
        resume: Option<&str>,
    ) -> Result<ApplicationEntry> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            r#"
            INSERT INTO applications (id, job_id, user_id, status, resume)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(job_id)
        .bind(user_id)
        .bind(ApplicationStatus::Applied)
        .bind(resume)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::validation("You have already applied for this job")
            }
            e => e.into(),
        })?;
        Ok(row)
    }

    pub async fn update_status(
        &mut self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
