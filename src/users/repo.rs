use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::db;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub is_delete: bool,
    pub room_id: Option<i64>,
    pub create_date: String,
}

pub async fn list_active(db: &SqlitePool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, active, is_delete, room_id, create_date
        FROM users
        WHERE is_delete = 0
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn create(db: &SqlitePool, name: &str) -> sqlx::Result<i64> {
    let res = sqlx::query("INSERT INTO users (name, create_date) VALUES (?1, ?2)")
        .bind(name)
        .bind(db::now_stamp())
        .execute(db)
        .await?;
    Ok(res.last_insert_rowid())
}

/// Returns the number of rows flipped; zero means the user does not
/// exist or was already deleted.
pub async fn soft_delete(db: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let res = sqlx::query("UPDATE users SET is_delete = 1 WHERE id = ?1 AND is_delete = 0")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

pub async fn set_room(db: &SqlitePool, id: i64, room_id: Option<i64>) -> sqlx::Result<u64> {
    let res = sqlx::query("UPDATE users SET room_id = ?1 WHERE id = ?2 AND is_delete = 0")
        .bind(room_id)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}
