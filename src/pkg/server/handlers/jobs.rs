use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::pkg::server::extract::{JsonBody, PathParam, QueryParams};
use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                mutators::JobMutator,
                selectors::JobSelector,
                spec::{CreateJobInput, JobDetail, JobEntry, JobSearch, PatchJobInput},
            },
            auth::User,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{ApiError, Result},
};

pub async fn list(
    State(state): State<AppState>,
    QueryParams(search): QueryParams<JobSearch>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).search(&search).await?;
    Ok(Json(jobs))
}

pub async fn detail(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<JobDetail>> {
    let mut conn = state.db_pool.acquire().await?;
    JobSelector::new(&mut conn)
        .get_detail(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Job not found"))
}

pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).get_by_poster(user.id).await?;
    Ok(Json(jobs))
}

pub async fn posted_by(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).get_by_poster(user_id).await?;
    Ok(Json(jobs))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    JsonBody(input): JsonBody<CreateJobInput>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    input.validate()?;
    let mut conn = state.db_pool.acquire().await?;
    let job = JobMutator::new(&mut conn).create(input, user.id).await?;
    tracing::info!("{} posted job {} ({})", &user.email, &job.title, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(input): JsonBody<PatchJobInput>,
) -> Result<Json<JobEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    user.ensure_owns(job.posted_by, "Not authorized to update this job")?;
    input.validate()?;
    let job = JobMutator::new(&mut tx)
        .update(id, input)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    tx.commit().await?;
    Ok(Json(job))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    user.ensure_owns(job.posted_by, "Not authorized to delete this job")?;
    JobMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    tracing::info!("{} deleted job {}", &user.email, id);
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
