use sqlx::{PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::pkg::internal::adaptors::jobs::spec::{
    CreateJobInput, JOB_COLUMNS, JobEntry, JobStatus, PatchJobInput,
};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: CreateJobInput, posted_by: Uuid) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            r#"
            INSERT INTO jobs (id, title, company, location, job_type, salary, description,
                              responsibilities, requirements, experience, tags, posted_by, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(job.title.trim())
        .bind(job.company.trim())
        .bind(job.location.trim())
        .bind(&job.job_type)
        .bind(&job.salary)
        .bind(job.description.trim())
        .bind(&job.responsibilities)
        .bind(&job.requirements)
        .bind(&job.experience)
        .bind(&job.tags)
        .bind(posted_by)
        .bind(JobStatus::Active)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: Uuid, job: PatchJobInput) -> Result<Option<JobEntry>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE jobs SET updated_at = NOW()");
        if let Some(title) = job.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(company) = job.company {
            qb.push(", company = ").push_bind(company);
        }
        if let Some(location) = job.location {
            qb.push(", location = ").push_bind(location);
        }
        if let Some(job_type) = job.job_type {
            qb.push(", job_type = ").push_bind(job_type);
        }
        if let Some(salary) = job.salary {
            qb.push(", salary = ").push_bind(salary);
        }
        if let Some(description) = job.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(responsibilities) = job.responsibilities {
            qb.push(", responsibilities = ").push_bind(responsibilities);
        }
        if let Some(requirements) = job.requirements {
            qb.push(", requirements = ").push_bind(requirements);
        }
        if let Some(experience) = job.experience {
            qb.push(", experience = ").push_bind(experience);
        }
        if let Some(tags) = job.tags {
            qb.push(", tags = ").push_bind(tags);
        }
        if let Some(status) = job.status {
            qb.push(", status = ").push_bind(status);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {JOB_COLUMNS}"));

        let row = qb
            .build_query_as::<JobEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn increment_applications(&mut self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE jobs SET applications = applications + 1 WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jobs")
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
