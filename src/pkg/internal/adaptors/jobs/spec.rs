use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::prelude::{ApiError, Result};

pub const JOB_COLUMNS: &str = "id, title, company, location, job_type, salary, description, \
    responsibilities, requirements, experience, tags, posted_by, status, applications, \
    created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub description: String,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub experience: Option<String>,
    pub tags: Vec<String>,
    pub posted_by: Uuid,
    pub status: JobStatus,
    pub applications: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct Poster {
    #[sqlx(rename = "poster_name")]
    pub name: String,
    #[sqlx(rename = "poster_email")]
    pub email: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct JobDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobEntry,
    #[sqlx(flatten)]
    pub poster: Poster,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobSearch {
    pub keyword: Option<String>,
    pub location: Option<String>,
}

impl JobSearch {
    pub fn keyword(&self) -> Option<&str> {
        non_blank(&self.keyword)
    }

    pub fn location(&self) -> Option<&str> {
        non_blank(&self.location)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateJobInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    #[serde(default)]
    pub description: String,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub experience: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateJobInput {
    pub fn validate(&self) -> Result<()> {
        let required = [&self.title, &self.company, &self.location, &self.description];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(ApiError::validation("Please provide all required fields"));
        }
        Ok(())
    }
}

/// Fields an owner may change. Ownership and identity are not patchable.
#[derive(Debug, Default, Deserialize)]
pub struct PatchJobInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub experience: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<JobStatus>,
}

impl PatchJobInput {
    pub fn validate(&self) -> Result<()> {
        let required = [&self.title, &self.company, &self.location, &self.description];
        if required
            .iter()
            .any(|f| f.as_deref().is_some_and(|v| v.trim().is_empty()))
        {
            return Err(ApiError::validation("Required fields cannot be empty"));
        }
        Ok(())
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Wraps user input for a case-insensitive substring match, escaping LIKE
/// wildcards so the input is matched literally.
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
