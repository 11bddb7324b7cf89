use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::pkg::server::extract::{JsonBody, PathParam};
use crate::{
    pkg::{
        internal::adaptors::companies::{
            mutators::CompanyMutator,
            selectors::CompanySelector,
            spec::{CompanyEntry, CreateCompanyInput},
        },
        server::state::AppState,
    },
    prelude::{ApiError, Result},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CompanyEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    Ok(Json(CompanySelector::new(&mut conn).get_all().await?))
}

pub async fn detail(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<CompanyEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    CompanySelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Company not found"))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCompanyInput>,
) -> Result<(StatusCode, Json<CompanyEntry>)> {
    input.validate()?;
    let mut conn = state.db_pool.acquire().await?;
    let company = CompanyMutator::new(&mut conn).create(&input).await?;
    Ok((StatusCode::CREATED, Json(company)))
}
