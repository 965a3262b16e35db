use anyhow::Context;
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Standard visibility predicates. Soft-delete and archive are
/// independent flags; every read path states explicitly which of the
/// two it applies, spelled once here.
pub const NOT_DELETED: &str = "is_delete = 0";
pub const NOT_ARCHIVED: &str = "archive = 0";

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// RFC 3339 creation stamp written alongside every insert.
pub fn now_stamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
