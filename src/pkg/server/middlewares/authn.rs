use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    pkg::{internal::auth::User, server::state::AppState},
    prelude::{ApiError, Result},
    token::verify_token,
};

pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        tracing::warn!("token missing, authentication denied");
        return Err(ApiError::unauthorized("Not authorized, no token"));
    };
    let claims = verify_token(bearer.token())?;
    let mut conn = state.db_pool.acquire().await?;
    match User::retrieve(&mut conn, claims.sub).await? {
        Some(user) => {
            tracing::debug!("authenticated {} ({:?})", &user.email, &user.role);
            request.extensions_mut().insert(Arc::new(user));
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!("token for unknown user {}", claims.sub);
            Err(ApiError::unauthorized("Not authorized, token failed"))
        }
    }
}
