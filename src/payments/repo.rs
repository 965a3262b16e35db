use rust_decimal::Decimal;
use sqlx::{FromRow, SqlitePool};

use crate::db::{self, NOT_ARCHIVED, NOT_DELETED};

use super::split::{Share, SplitMode};

#[derive(Debug, Clone, FromRow)]
pub struct PaymentListRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub payer_id: i64,
    pub note: String,
    pub payer_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PaymentDetailRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
    pub payer_id: i64,
    pub split_by: String,
    pub rooms: Option<String>,
    pub payer_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ShareRow {
    pub payment_id: i64,
    pub user_id: i64,
    pub amount: String,
    pub user_name: String,
    pub room_id: Option<i64>,
}

pub struct NewPayment<'a> {
    pub date: &'a str,
    pub category: &'a str,
    pub amount: Decimal,
    pub payer_id: i64,
    pub note: &'a str,
    pub split_by: SplitMode,
    pub room_list: Option<&'a [i64]>,
}

pub async fn list_active(db: &SqlitePool) -> sqlx::Result<Vec<PaymentListRow>> {
    let sql = format!(
        r#"
        SELECT
            p.id,
            p.date,
            p.category,
            p.amount,
            p.payer_id,
            p.note,
            u.name AS payer_name
        FROM payments p
        JOIN users u ON u.id = p.payer_id
        WHERE p.{NOT_DELETED}
          AND p.{NOT_ARCHIVED}
        ORDER BY p.date DESC
        "#
    );
    sqlx::query_as::<_, PaymentListRow>(&sql).fetch_all(db).await
}

pub async fn list_with_payer(
    db: &SqlitePool,
    archived: bool,
) -> sqlx::Result<Vec<PaymentDetailRow>> {
    let sql = format!(
        r#"
        SELECT
            p.id,
            p.date,
            p.category,
            p.amount,
            p.note,
            p.payer_id,
            p.split_by,
            p.rooms,
            u.name AS payer_name
        FROM payments p
        JOIN users u ON u.id = p.payer_id
        WHERE p.{NOT_DELETED}
          AND p.archive = ?1
        ORDER BY p.date DESC
        "#
    );
    sqlx::query_as::<_, PaymentDetailRow>(&sql)
        .bind(archived)
        .fetch_all(db)
        .await
}

pub async fn active_shares_with_users(db: &SqlitePool) -> sqlx::Result<Vec<ShareRow>> {
    let sql = format!(
        r#"
        SELECT
            pu.payment_id,
            pu.user_id,
            pu.amount,
            u.name AS user_name,
            u.room_id
        FROM payment_users pu
        JOIN users u ON u.id = pu.user_id
        WHERE pu.{NOT_DELETED}
        "#
    );
    sqlx::query_as::<_, ShareRow>(&sql).fetch_all(db).await
}

/// Inserts the payment and every computed share as a single
/// transaction; a failed share insert rolls the payment back too.
pub async fn insert_with_shares(
    db: &SqlitePool,
    payment: NewPayment<'_>,
    shares: &[Share],
) -> sqlx::Result<i64> {
    let rooms_json = payment
        .room_list
        .map(|ids| serde_json::to_string(ids).unwrap_or_default());
    let stamp = db::now_stamp();

    let mut tx = db.begin().await?;

    let res = sqlx::query(
        r#"
        INSERT INTO payments (date, category, amount, payer_id, note, split_by, rooms, create_date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(payment.date)
    .bind(payment.category)
    .bind(payment.amount.to_string())
    .bind(payment.payer_id)
    .bind(payment.note)
    .bind(payment.split_by.as_str())
    .bind(rooms_json)
    .bind(&stamp)
    .execute(&mut *tx)
    .await?;
    let payment_id = res.last_insert_rowid();

    for share in shares {
        sqlx::query(
            r#"
            INSERT INTO payment_users (payment_id, user_id, amount, is_fixed, create_date)
            VALUES (?1, ?2, ?3, 1, ?4)
            "#,
        )
        .bind(payment_id)
        .bind(share.user_id)
        .bind(share.amount.to_string())
        .bind(&stamp)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(payment_id)
}

/// Soft-deletes the payment and cascades to its shares; both updates
/// commit together. Returns zero without touching anything when no live
/// payment matched.
pub async fn soft_delete_with_shares(db: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let mut tx = db.begin().await?;

    let res = sqlx::query("UPDATE payments SET is_delete = 1 WHERE id = ?1 AND is_delete = 0")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if res.rows_affected() == 0 {
        return Ok(0);
    }

    sqlx::query("UPDATE payment_users SET is_delete = 1 WHERE payment_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(res.rows_affected())
}

pub async fn set_archive(db: &SqlitePool, id: i64, archived: bool) -> sqlx::Result<u64> {
    let res = sqlx::query("UPDATE payments SET archive = ?1 WHERE id = ?2 AND is_delete = 0")
        .bind(archived)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}
