use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreatePaymentRequest, ListQuery, PaymentListItem, PaymentWithUsers};
use super::{repo, service};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments-with-users", get(list_payments_with_users))
        .route("/payments/:id", axum::routing::delete(delete_payment))
        .route("/payments/:id/archive", post(archive_payment))
        .route("/payments/:id/unarchive", post(unarchive_payment))
}

#[instrument(skip(state))]
pub async fn list_payments(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentListItem>>, ApiError> {
    let payments = service::list_payments(&state.db).await?;
    Ok(Json(payments))
}

#[instrument(skip(state))]
pub async fn list_payments_with_users(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<PaymentWithUsers>>, ApiError> {
    let payments = service::list_with_split_detail(&state.db, q.archived == 1).await?;
    Ok(Json(payments))
}

#[instrument(skip(state, payload))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = service::create_payment(&state.db, payload).await?;
    info!(payment_id = id, "payment created");
    Ok(Json(json!({ "success": true, "id": id })))
}

#[instrument(skip(state))]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if repo::soft_delete_with_shares(&state.db, id).await? == 0 {
        return Err(ApiError::not_found("payment not found"));
    }
    info!(payment_id = id, "payment soft-deleted with shares");
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state))]
pub async fn archive_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    toggle_archive(&state, id, true).await
}

#[instrument(skip(state))]
pub async fn unarchive_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    toggle_archive(&state, id, false).await
}

async fn toggle_archive(state: &AppState, id: i64, archived: bool) -> Result<Json<Value>, ApiError> {
    if repo::set_archive(&state.db, id, archived).await? == 0 {
        return Err(ApiError::not_found("payment not found"));
    }
    info!(payment_id = id, archived, "payment archive flag updated");
    Ok(Json(json!({ "success": true })))
}
