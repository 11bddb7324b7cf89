use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use uuid::Uuid;

use crate::pkg::server::extract::{JsonBody, PathParam};
use crate::{
    pkg::{
        internal::{
            adaptors::{
                applications::{
                    mutators::ApplicationMutator,
                    selectors::ApplicationSelector,
                    spec::{
                        ApplicationEntry, ApplicationStatus, CreateApplicationInput,
                        EmployerApplication, JobApplicant, MyApplication, PatchApplicationInput,
                    },
                },
                jobs::{mutators::JobMutator, selectors::JobSelector, spec::JobStatus},
            },
            auth::User,
            notify,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{ApiError, Result},
};

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    JsonBody(input): JsonBody<CreateApplicationInput>,
) -> Result<(StatusCode, Json<ApplicationEntry>)> {
    let mut tx = state.db_pool.begin_txn().await?;
    if ApplicationSelector::new(&mut tx)
        .exists(input.job_id, user.id)
        .await?
    {
        return Err(ApiError::validation("You have already applied for this job"));
    }
    let job = JobSelector::new(&mut tx)
        .get_by_id(input.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    if job.status == JobStatus::Closed {
        return Err(ApiError::validation(
            "This job is no longer accepting applications",
        ));
    }
    let application = ApplicationMutator::new(&mut tx)
        .create(job.id, user.id, input.resume.as_deref())
        .await?;
    JobMutator::new(&mut tx).increment_applications(job.id).await?;
    tx.commit().await?;
    notify::application_received(&user, &job);
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<MyApplication>>> {
    let mut conn = state.db_pool.acquire().await?;
    let applications = ApplicationSelector::new(&mut conn)
        .for_candidate(user.id)
        .await?;
    Ok(Json(applications))
}

pub async fn employer_all(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<EmployerApplication>>> {
    let mut conn = state.db_pool.acquire().await?;
    let applications = ApplicationSelector::new(&mut conn)
        .for_employer(user.id)
        .await?;
    Ok(Json(applications))
}

pub async fn for_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    PathParam(job_id): PathParam<Uuid>,
) -> Result<Json<Vec<JobApplicant>>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = JobSelector::new(&mut conn)
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    user.ensure_owns(job.posted_by, "Not authorized")?;
    let applicants = ApplicationSelector::new(&mut conn).for_job(job.id).await?;
    Ok(Json(applicants))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(input): JsonBody<PatchApplicationInput>,
) -> Result<Json<ApplicationEntry>> {
    let status: ApplicationStatus = input.status.parse()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let application = ApplicationSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(application.job_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    user.ensure_owns(job.posted_by, "Not authorized")?;
    let application = ApplicationMutator::new(&mut tx)
        .update_status(id, status)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;
    tx.commit().await?;
    tracing::info!("application {} moved to {:?}", id, status);
    Ok(Json(application))
}
