use sqlx::{FromRow, SqlitePool};

use crate::db::{NOT_ARCHIVED, NOT_DELETED};

#[derive(Debug, Clone, FromRow)]
pub struct ActiveUser {
    pub id: i64,
    pub name: String,
}

/// A single amount attributed to a user, either as payer or as share
/// recipient.
#[derive(Debug, Clone, FromRow)]
pub struct AmountRow {
    pub user_id: i64,
    pub amount: String,
}

pub async fn active_users(db: &SqlitePool) -> sqlx::Result<Vec<ActiveUser>> {
    let sql = format!("SELECT id, name FROM users WHERE {NOT_DELETED}");
    sqlx::query_as::<_, ActiveUser>(&sql).fetch_all(db).await
}

/// Amounts paid out, one row per non-deleted, non-archived payment.
pub async fn paid_rows(db: &SqlitePool) -> sqlx::Result<Vec<AmountRow>> {
    let sql = format!(
        r#"
        SELECT payer_id AS user_id, amount
        FROM payments
        WHERE {NOT_DELETED} AND {NOT_ARCHIVED}
        "#
    );
    sqlx::query_as::<_, AmountRow>(&sql).fetch_all(db).await
}

/// Amounts owed, one row per non-deleted share of a non-deleted,
/// non-archived payment. Both predicates are stated explicitly.
pub async fn owed_rows(db: &SqlitePool) -> sqlx::Result<Vec<AmountRow>> {
    let sql = format!(
        r#"
        SELECT pu.user_id, pu.amount
        FROM payment_users pu
        JOIN payments p ON p.id = pu.payment_id
        WHERE pu.{NOT_DELETED} AND p.{NOT_DELETED} AND p.{NOT_ARCHIVED}
        "#
    );
    sqlx::query_as::<_, AmountRow>(&sql).fetch_all(db).await
}
