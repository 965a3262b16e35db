use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreateRoomRequest, RoomWithUsers};
use super::{repo, service};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/:id", axum::routing::delete(delete_room))
}

#[instrument(skip(state))]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomWithUsers>>, ApiError> {
    let rooms = service::list_with_occupants(&state.db).await?;
    Ok(Json(rooms))
}

#[instrument(skip(state, payload))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        warn!("create_room rejected: name missing");
        return Err(ApiError::validation("name is required"));
    }

    let id = repo::create(&state.db, name).await?;
    info!(room_id = id, "room created");
    Ok(Json(json!({ "success": true, "id": id })))
}

#[instrument(skip(state))]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    service::remove_room(&state.db, id).await?;
    info!(room_id = id, "room deleted");
    Ok(Json(json!({ "success": true })))
}
