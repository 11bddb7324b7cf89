use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use validator::Validate;

use crate::pkg::server::extract::JsonBody;
use crate::{
    pkg::{
        internal::{
            adaptors::contacts::{mutators::ContactMutator, spec::ContactInput},
            notify,
        },
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn submit(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ContactInput>,
) -> Result<(StatusCode, Json<Value>)> {
    input.validate()?;
    let mut conn = state.db_pool.acquire().await?;
    let contact = ContactMutator::new(&mut conn).create(&input).await?;
    notify::contact_received(&contact);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Message sent successfully", "contact": contact })),
    ))
}
