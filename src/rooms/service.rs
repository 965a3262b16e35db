use sqlx::SqlitePool;

use crate::error::ApiError;

use super::dto::RoomWithUsers;
use super::repo;

pub async fn list_with_occupants(db: &SqlitePool) -> Result<Vec<RoomWithUsers>, ApiError> {
    let rooms = repo::list(db).await?;
    let occupants = repo::list_occupants(db).await?;

    Ok(rooms
        .into_iter()
        .map(|room| {
            let users = occupants
                .iter()
                .filter(|u| u.room_id == Some(room.id))
                .cloned()
                .collect();
            RoomWithUsers {
                id: room.id,
                name: room.name,
                users,
            }
        })
        .collect())
}

/// Deletion is blocked while any non-deleted resident is still assigned
/// to the room.
pub async fn remove_room(db: &SqlitePool, id: i64) -> Result<(), ApiError> {
    if repo::active_occupant_count(db, id).await? > 0 {
        return Err(ApiError::validation(
            "room still has residents assigned and cannot be deleted",
        ));
    }
    if repo::hard_delete(db, id).await? == 0 {
        return Err(ApiError::not_found("room not found"));
    }
    Ok(())
}
