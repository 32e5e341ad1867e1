use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub const CATALOG_TABLES: [&str; 3] = ["filieres", "syllabus", "informations_enspd"];

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Number of catalog tables present, used by readiness checks.
pub async fn catalog_table_count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('filieres', 'syllabus', 'informations_enspd')",
    )
    .fetch_one(pool)
    .await
}
