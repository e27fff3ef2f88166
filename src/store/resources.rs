use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use super::{StoreError, StoreResult};

/// A title/body/active table. Events and materials share one store and one
/// set of handlers through this trait.
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Singular name, used as the payload key of a create response and in logs.
    const KIND: &'static str;
    /// Route prefix under `/admin` and `/member`.
    const PATH: &'static str;
    const LISTING_COLUMNS: &'static str;
    const LISTING_ORDER: &'static str;

    type Draft: DeserializeOwned + Send + 'static;
    /// Member projection, no `id` or `active`.
    type Listing: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static;

    /// Checks required fields and returns the column values to insert.
    fn columns(draft: Self::Draft) -> StoreResult<Vec<(&'static str, String)>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    ActiveOnly,
}

pub struct ResourceStore<R> {
    db_pool: SqlitePool,
    resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            db_pool: self.db_pool.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool, resource: PhantomData }
    }

    /// `All` in insertion order; `ActiveOnly` in the resource's listing order.
    pub async fn list(&self, filter: Filter) -> StoreResult<Vec<R>> {
        let sql = match filter {
            Filter::All => format!("SELECT * FROM {} ORDER BY id", R::TABLE),
            Filter::ActiveOnly => format!("SELECT * FROM {} WHERE active=1 ORDER BY {}", R::TABLE, R::LISTING_ORDER),
        };

        Ok(sqlx::query_as::<_, R>(&sql).fetch_all(&self.db_pool).await?)
    }

    pub async fn listing(&self) -> StoreResult<Vec<R::Listing>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE active=1 ORDER BY {}",
            R::LISTING_COLUMNS,
            R::TABLE,
            R::LISTING_ORDER
        );

        Ok(sqlx::query_as::<_, R::Listing>(&sql).fetch_all(&self.db_pool).await?)
    }

    /// New rows start active.
    pub async fn create(&self, draft: R::Draft) -> StoreResult<R> {
        let columns = R::columns(draft)?;
        let names = columns.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(",");
        let placeholders = vec!["?"; columns.len()].join(",");
        let sql = format!("INSERT INTO {} ({names},active) VALUES ({placeholders},1) RETURNING *", R::TABLE);

        let mut query = sqlx::query_as::<_, R>(&sql);
        for (_, value) in columns {
            query = query.bind(value);
        }

        Ok(query.fetch_one(&self.db_pool).await?)
    }

    /// Setting the current value again succeeds.
    pub async fn set_active(&self, id: i64, active: bool) -> StoreResult<()> {
        let sql = format!("UPDATE {} SET active=? WHERE id=?", R::TABLE);
        let result = sqlx::query(&sql).bind(active).bind(id).execute(&self.db_pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
