use sqlx::sqlite::SqliteQueryResult;

pub async fn create_holdings(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    // Amounts are kept as TEXT so they round-trip through SQLite without a detour via REAL.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS holdings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            quantity TEXT NOT NULL,
            purchase_price TEXT NOT NULL,
            current_price TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}
