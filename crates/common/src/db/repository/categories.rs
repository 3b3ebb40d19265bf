//! Categories repository
//!
//! Categories double as the enumerated validation domain for resource
//! creation and listing: the current id set is fetched before a request
//! referencing a category is accepted.

use crate::db::models::{Category, CategoryColumn, CategoryEntity};
use crate::db::repository::BaseRepository;
use crate::db::DbPool;
use crate::errors::Result;
use sea_orm::QuerySelect;

#[derive(Clone)]
pub struct CategoriesRepository {
    base: BaseRepository<CategoryEntity>,
}

impl CategoriesRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            base: BaseRepository::new(pool, CategoryColumn::Id),
        }
    }

    /// All categories in store-default order
    pub async fn list(&self) -> Result<Vec<Category>> {
        self.base
            .all()
            .all(self.base.pool().read())
            .await
            .map_err(Into::into)
    }

    /// Currently valid category ids, without row bodies
    pub async fn ids(&self) -> Result<Vec<i64>> {
        self.base
            .all()
            .select_only()
            .column(CategoryColumn::Id)
            .into_tuple()
            .all(self.base.pool().read())
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.base.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_ids_projects_identifier_column_only() {
        let rows: Vec<BTreeMap<&str, sea_orm::Value>> = vec![
            BTreeMap::from([("id", sea_orm::Value::BigInt(Some(1)))]),
            BTreeMap::from([("id", sea_orm::Value::BigInt(Some(3)))]),
        ];
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows])
            .into_connection();
        let repo = CategoriesRepository::new(DbPool {
            primary: conn,
            replica: None,
        });

        let ids = repo.ids().await.unwrap();
        assert_eq!(ids, vec![1, 3]);
    }
}
