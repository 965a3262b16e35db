use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Room {
    pub id: i64,
    pub name: String,
}

/// A non-deleted user as shown inside a room listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Occupant {
    pub id: i64,
    pub name: String,
    pub room_id: Option<i64>,
}

pub async fn list(db: &SqlitePool) -> sqlx::Result<Vec<Room>> {
    sqlx::query_as::<_, Room>("SELECT id, name FROM rooms")
        .fetch_all(db)
        .await
}

pub async fn list_occupants(db: &SqlitePool) -> sqlx::Result<Vec<Occupant>> {
    sqlx::query_as::<_, Occupant>(
        "SELECT id, name, room_id FROM users WHERE is_delete = 0",
    )
    .fetch_all(db)
    .await
}

pub async fn create(db: &SqlitePool, name: &str) -> sqlx::Result<i64> {
    let res = sqlx::query("INSERT INTO rooms (name) VALUES (?1)")
        .bind(name)
        .execute(db)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn active_occupant_count(db: &SqlitePool, room_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM users WHERE room_id = ?1 AND is_delete = 0",
    )
    .bind(room_id)
    .fetch_one(db)
    .await
}

/// Current occupants of one room, resolved at call time.
pub async fn occupant_ids(db: &SqlitePool, room_id: i64) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar::<_, i64>(
        "SELECT id FROM users WHERE room_id = ?1 AND is_delete = 0",
    )
    .bind(room_id)
    .fetch_all(db)
    .await
}

pub async fn names(db: &SqlitePool) -> sqlx::Result<Vec<(i64, String)>> {
    sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM rooms")
        .fetch_all(db)
        .await
}

/// Rooms carry no soft-delete flag; removal is a hard delete.
pub async fn hard_delete(db: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let res = sqlx::query("DELETE FROM rooms WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}
