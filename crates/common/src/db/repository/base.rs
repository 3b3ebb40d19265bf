//! Generic repository over a single table
//!
//! Wraps one entity with typed create/update/delete/find/paginate
//! operations. The identifier column is explicit configuration passed at
//! construction; repositories built without one (pivot tables) loudly
//! reject single-row operations instead of guessing a key.

use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::DEFAULT_PAGE_SIZE;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QuerySelect, Select, Value,
};

/// Requested page of a listing; both fields optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// Inclusive row-offset window computed from a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub from: u64,
    pub to: u64,
}

impl PageRange {
    /// Number of rows the window spans
    pub fn limit(&self) -> u64 {
        self.to.saturating_sub(self.from) + 1
    }
}

/// Compute the inclusive offset window for a page request.
///
/// `size` defaults to 20 when absent; a missing `page` means the first one.
pub fn page_range(request: &PageRequest) -> PageRange {
    let size = request.size.unwrap_or(DEFAULT_PAGE_SIZE);
    let from = request.page.map_or(0, |page| page * size);

    PageRange {
        from,
        to: from + size.saturating_sub(1),
    }
}

/// Typed facade over one table
#[derive(Clone)]
pub struct BaseRepository<E: EntityTrait> {
    pool: DbPool,
    id_column: Option<E::Column>,
}

impl<E: EntityTrait> BaseRepository<E> {
    /// Create a repository keyed by the given identifier column
    pub fn new(pool: DbPool, id_column: E::Column) -> Self {
        Self {
            pool,
            id_column: Some(id_column),
        }
    }

    /// Create a repository without an identifier column (pivot tables);
    /// single-row operations will fail with `MissingIdentifier`
    pub fn unkeyed(pool: DbPool) -> Self {
        Self {
            pool,
            id_column: None,
        }
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn id_column(&self) -> Result<E::Column> {
        self.id_column.ok_or_else(|| AppError::MissingIdentifier {
            repository: E::default().table_name().to_string(),
        })
    }

    /// Insert one row and return it with server-assigned fields populated
    pub async fn create<A>(&self, item: A) -> Result<E::Model>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        item.insert(self.pool.write()).await.map_err(Into::into)
    }

    /// Bulk insert, returning the inserted rows (all-or-nothing)
    pub async fn create_many<A>(&self, items: Vec<A>) -> Result<Vec<E::Model>>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        E::insert_many(items)
            .exec_with_returning_many(self.pool.write())
            .await
            .map_err(Into::into)
    }

    /// Bulk insert without fetching row bodies back; returns the number of
    /// inserted rows. This is the pivot-row insert mode.
    pub async fn create_many_minimal<A>(&self, items: Vec<A>) -> Result<u64>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        if items.is_empty() {
            return Ok(0);
        }

        E::insert_many(items)
            .exec_without_returning(self.pool.write())
            .await
            .map_err(Into::into)
    }

    /// Apply a partial update to the row(s) matching the identifier
    pub async fn update<A, V>(&self, id: V, item: A) -> Result<Vec<E::Model>>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        V: Into<Value>,
    {
        let id_column = self.id_column()?;

        E::update_many()
            .set(item)
            .filter(id_column.eq(id))
            .exec_with_returning(self.pool.write())
            .await
            .map_err(Into::into)
    }

    /// Delete by identifier; returns whether a delete occurred
    pub async fn delete<V: Into<Value>>(&self, id: V) -> Result<bool> {
        let id_column = self.id_column()?;

        let result = E::delete_many()
            .filter(id_column.eq(id))
            .exec(self.pool.write())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Fetch at most one row by identifier; absence is not an error
    pub async fn find_by_id<V: Into<Value>>(&self, id: V) -> Result<Option<E::Model>> {
        let id_column = self.id_column()?;

        E::find()
            .filter(id_column.eq(id))
            .one(self.pool.read())
            .await
            .map_err(Into::into)
    }

    /// A composable, unexecuted query over all rows; callers may filter
    /// further before executing
    pub fn all(&self) -> Select<E> {
        E::find()
    }

    /// Fetch one page of rows in store-default order
    pub async fn paginate(&self, request: &PageRequest) -> Result<Vec<E::Model>> {
        let range = page_range(request);

        E::find()
            .offset(range.from)
            .limit(range.limit())
            .all(self.pool.read())
            .await
            .map_err(Into::into)
    }

    /// Count all rows without fetching bodies
    pub async fn count(&self) -> Result<u64>
    where
        E::Model: Sync,
    {
        E::find()
            .count(self.pool.read())
            .await
            .map_err(Into::into)
    }
}
