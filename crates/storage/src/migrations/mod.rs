#![allow(
    clippy::redundant_pub_crate,
    reason = "migrations module is private, pub(crate) is intentional"
)]

mod column_helpers;
mod v1;
mod v2;

use column_helpers::add_column_if_not_exists;
use sqlx::SqlitePool;

pub const SCHEMA_VERSION: i64 = 2;

pub(crate) async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let current_version: i64 = sqlx::query_scalar("PRAGMA user_version").fetch_one(pool).await?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1 {
        tracing::info!("Running migration v1: gauges and gauge_values");
        sqlx::raw_sql(v1::SQL).execute(pool).await?;
    }

    if current_version < 2 {
        tracing::info!("Running migration v2: step column on gauges");
        add_column_if_not_exists(pool, "gauges", v2::STEP_COLUMN, v2::STEP_COLUMN_DEF).await?;
    }

    // PRAGMA does not accept bound parameters.
    sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}")).execute(pool).await?;
    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);

    Ok(())
}
