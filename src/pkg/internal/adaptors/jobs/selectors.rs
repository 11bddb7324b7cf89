use sqlx::{PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    pkg::internal::adaptors::jobs::spec::{JOB_COLUMNS, JobDetail, JobEntry, JobSearch, like_pattern},
    prelude::Result,
};

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: Uuid) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_detail(&mut self, id: Uuid) -> Result<Option<JobDetail>> {
        let row = sqlx::query_as::<_, JobDetail>(
            r#"
            SELECT j.id, j.title, j.company, j.location, j.job_type, j.salary, j.description,
                   j.responsibilities, j.requirements, j.experience, j.tags, j.posted_by,
                   j.status, j.applications, j.created_at, j.updated_at,
                   u.name AS poster_name, u.email AS poster_email
            FROM jobs j JOIN users u ON u.id = j.posted_by
            WHERE j.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn search(&mut self, search: &JobSearch) -> Result<Vec<JobEntry>> {
        let mut qb = search_query(search);
        let rows = qb
            .build_query_as::<JobEntry>()
            .fetch_all(&mut *self.pool)
            .await?;
        tracing::debug!("job search {:?} matched {} rows", search, rows.len());
        Ok(rows)
    }

    pub async fn get_by_poster(&mut self, user_id: Uuid) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE posted_by = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}

/// Keyword matches title, description or any tag; location is matched on its
/// own. Both are case-insensitive substrings. Newest postings first.
pub fn search_query(search: &JobSearch) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {JOB_COLUMNS} FROM jobs WHERE TRUE"));
    if let Some(keyword) = search.keyword() {
        let pattern = like_pattern(keyword);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
    if let Some(location) = search.location() {
        qb.push(" AND location ILIKE ")
            .push_bind(like_pattern(location));
    }
    qb.push(" ORDER BY created_at DESC");
    qb
}
