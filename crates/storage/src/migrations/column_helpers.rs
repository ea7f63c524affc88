use sqlx::SqlitePool;

pub(super) async fn column_exists(
    pool: &SqlitePool,
    table: &str,
    column: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub(super) async fn add_column_if_not_exists(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    col_type: &str,
) -> Result<(), sqlx::Error> {
    if !column_exists(pool, table, column).await? {
        let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {col_type}");
        sqlx::query(&sql).execute(pool).await?;
    }
    Ok(())
}
