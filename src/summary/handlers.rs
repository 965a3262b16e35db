use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::UserBalance;
use super::service;

pub fn routes() -> Router<AppState> {
    Router::new().route("/summary", get(get_summary))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserBalance>>, ApiError> {
    let balances = service::balances(&state.db).await?;
    Ok(Json(balances))
}
