use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing::debug;

use crate::{
    db::{init, utils::parse_holding},
    error::PortfolioResult,
    models::{Holding, NewHolding},
};

/// Durable mapping from store-assigned ids to holdings.
///
/// `list_all` must return holdings in a stable order (ascending id), which makes tie-breaking
/// in the analytics reproducible.
#[allow(async_fn_in_trait)]
pub trait HoldingStore {
    async fn create(&self, holding: NewHolding) -> PortfolioResult<Holding>;
    async fn list_all(&self) -> PortfolioResult<Vec<Holding>>;
    async fn exists_by_id(&self, id: i64) -> PortfolioResult<bool>;
    async fn delete_by_id(&self, id: i64) -> PortfolioResult<()>;
}

#[derive(Clone, Debug)]
pub struct SqliteHoldingStore {
    pool: SqlitePool,
}

impl SqliteHoldingStore {
    /// Opens (creating if needed) the database file and makes sure the schema exists.
    pub async fn connect(path: impl AsRef<Path>) -> PortfolioResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        debug!(path = %path.as_ref().display(), "opened holdings database");

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> PortfolioResult<Self> {
        init::create_holdings(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl HoldingStore for SqliteHoldingStore {
    async fn create(&self, holding: NewHolding) -> PortfolioResult<Holding> {
        let id = sqlx::query(
            r#"
            INSERT INTO holdings
            (name, quantity, purchase_price, current_price)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(holding.name().as_str())
        .bind(holding.quantity().to_string())
        .bind(holding.purchase_price().to_string())
        .bind(holding.current_price().to_string())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(holding.into_holding(id))
    }

    async fn list_all(&self) -> PortfolioResult<Vec<Holding>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, quantity, purchase_price, current_price
            FROM holdings
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(parse_holding).collect()
    }

    async fn exists_by_id(&self, id: i64) -> PortfolioResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM holdings WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> PortfolioResult<()> {
        sqlx::query("DELETE FROM holdings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
