use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::applications::spec::{
    APPLICATION_COLUMNS, ApplicationEntry, EmployerApplication, JobApplicant, MyApplication,
};
use crate::prelude::Result;

pub struct ApplicationSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: Uuid) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&mut self, job_id: Uuid, user_id: Uuid) -> Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE job_id = $1 AND user_id = $2)",
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(found)
    }

    pub async fn for_candidate(&mut self, user_id: Uuid) -> Result<Vec<MyApplication>> {
        let rows = sqlx::query_as::<_, MyApplication>(
            r#"
            SELECT a.id, a.job_id, a.user_id, a.status, a.resume, a.created_at,
                   j.title AS job_title, j.company AS job_company, j.location AS job_location
            FROM applications a JOIN jobs j ON j.id = a.job_id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn for_employer(&mut self, employer_id: Uuid) -> Result<Vec<EmployerApplication>> {
        let rows = sqlx::query_as::<_, EmployerApplication>(
            r#"
            SELECT a.id, u.name AS candidate_name, u.email AS candidate_email,
                   j.title AS job_title, a.resume, a.status, a.created_at
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.user_id
            WHERE j.posted_by = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn for_job(&mut self, job_id: Uuid) -> Result<Vec<JobApplicant>> {
        let rows = sqlx::query_as::<_, JobApplicant>(
            r#"
            SELECT a.id, a.job_id, a.user_id, a.status, a.resume, a.created_at,
                   u.name AS candidate_name, u.email AS candidate_email
            FROM applications a JOIN users u ON u.id = a.user_id
            WHERE a.job_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
