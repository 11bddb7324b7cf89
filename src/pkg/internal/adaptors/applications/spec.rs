use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use uuid::Uuid;

use crate::prelude::ApiError;

pub const APPLICATION_COLUMNS: &str = "id, job_id, user_id, status, resume, created_at";

/// Lifecycle of an application. Employers coming from the older vocabulary
/// may send `pending`, `shortlisted` or `accepted`; those are folded into the
/// equivalent state here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Viewed,
    Interviewing,
    Hired,
    Rejected,
}

impl FromStr for ApplicationStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applied" | "pending" => Ok(ApplicationStatus::Applied),
            "viewed" => Ok(ApplicationStatus::Viewed),
            "interviewing" | "shortlisted" => Ok(ApplicationStatus::Interviewing),
            "hired" | "accepted" => Ok(ApplicationStatus::Hired),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(ApiError::validation("Invalid status")),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationEntry {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub status: ApplicationStatus,
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A candidate's own application alongside the posting it targets.
#[derive(Debug, Serialize, FromRow)]
pub struct MyApplication {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationEntry,
    pub job_title: String,
    pub job_company: String,
    pub job_location: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct EmployerApplication {
    pub id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    pub resume: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct JobApplicant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationEntry,
    pub candidate_name: String,
    pub candidate_email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationInput {
    #[serde(alias = "jobId")]
    pub job_id: Uuid,
    pub resume: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchApplicationInput {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_both_vocabularies_parse_to_one_status_set() {
        let cases = [
            ("applied", ApplicationStatus::Applied),
            ("pending", ApplicationStatus::Applied),
            ("viewed", ApplicationStatus::Viewed),
            ("interviewing", ApplicationStatus::Interviewing),
            ("shortlisted", ApplicationStatus::Interviewing),
            ("hired", ApplicationStatus::Hired),
            ("Accepted", ApplicationStatus::Hired),
            ("rejected", ApplicationStatus::Rejected),
        ];
        for (raw, expected) in cases {
            assert_eq!(raw.parse::<ApplicationStatus>().unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn test_unknown_status_is_a_bad_request() {
        let err = "archived".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid status");
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_canonically() {
        let json = serde_json::to_string(&"shortlisted".parse::<ApplicationStatus>().unwrap())
            .unwrap();
        assert_eq!(json, "\"interviewing\"");
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }
}
