use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pkg::server::extract::JsonBody;
use crate::{
    pkg::{
        internal::auth::{Role, User},
        server::state::AppState,
    },
    prelude::{ApiError, Result},
    token::generate_token,
};

#[derive(Deserialize, Validate)]
pub struct RegisterInput {
    #[serde(default, alias = "username")]
    #[validate(custom(function = "crate::prelude::non_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginInput {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

impl AuthResponse {
    fn issue(user: User) -> Result<Self> {
        let token = generate_token(user.id, user.role)?;
        Ok(AuthResponse { user, token })
    }
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;
    let role: Role = input.role.parse()?;
    let mut conn = state.db_pool.acquire().await?;
    if User::retrieve_by_email(&mut conn, &input.email).await?.is_some() {
        return Err(ApiError::validation("User already exists"));
    }
    let user = User::create(
        &mut conn,
        input.name.trim(),
        &input.email,
        &input.password,
        role,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::issue(user)?)))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<AuthResponse>> {
    input.validate()?;
    let mut conn = state.db_pool.acquire().await?;
    let user = User::authenticate(&mut conn, &input.email, &input.password).await?;
    tracing::info!("{} logged in", &user.email);
    Ok(Json(AuthResponse::issue(user)?))
}

pub async fn me(Extension(user): Extension<Arc<User>>) -> Result<Json<User>> {
    Ok(Json(User::clone(&user)))
}
