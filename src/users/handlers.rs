use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{AssignRoomRequest, CreateUserRequest};
use super::repo::{self, User};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", axum::routing::delete(delete_user))
        .route("/users/:id/assign-room", post(assign_room))
        .route("/users/:id/unbind-room", post(unbind_room))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = repo::list_active(&state.db).await?;
    Ok(Json(users))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        warn!("create_user rejected: name missing");
        return Err(ApiError::validation("name is required"));
    }

    let id = repo::create(&state.db, name).await?;
    info!(user_id = id, "user created");
    Ok(Json(json!({ "success": true, "id": id })))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if repo::soft_delete(&state.db, id).await? == 0 {
        return Err(ApiError::not_found("user not found"));
    }
    info!(user_id = id, "user soft-deleted");
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state, payload))]
pub async fn assign_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignRoomRequest>,
) -> Result<Json<Value>, ApiError> {
    let Some(room_id) = payload.room_id else {
        return Err(ApiError::validation("roomId is required"));
    };

    if repo::set_room(&state.db, id, Some(room_id)).await? == 0 {
        return Err(ApiError::not_found("user not found"));
    }
    info!(user_id = id, room_id, "user assigned to room");
    Ok(Json(json!({ "success": true })))
}

#[instrument(skip(state))]
pub async fn unbind_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if repo::set_room(&state.db, id, None).await? == 0 {
        return Err(ApiError::not_found("user not found"));
    }
    info!(user_id = id, "user unbound from room");
    Ok(Json(json!({ "success": true })))
}
