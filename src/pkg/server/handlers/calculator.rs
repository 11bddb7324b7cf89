use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pkg::server::extract::JsonBody;
use crate::{
    pkg::internal::calculator::{Calculator, Snapshot},
    prelude::Result,
};

#[derive(Deserialize)]
pub struct KeysInput {
    #[serde(default)]
    pub keys: Vec<String>,
}

#[derive(Serialize)]
pub struct KeysOutput {
    #[serde(flatten)]
    pub state: Snapshot,
    pub ignored: Vec<String>,
}

/// Replays a key sequence on a fresh calculator and returns what the widget
/// would show afterwards.
pub async fn press(JsonBody(input): JsonBody<KeysInput>) -> Result<Json<KeysOutput>> {
    let mut calc = Calculator::new();
    let ignored = calc.press_all(input.keys.iter().map(String::as_str));
    Ok(Json(KeysOutput {
        state: calc.snapshot(),
        ignored,
    }))
}
