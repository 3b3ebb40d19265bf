//! Users repository

use crate::db::models::{User, UserColumn, UserEntity};
use crate::db::repository::BaseRepository;
use crate::db::DbPool;
use crate::errors::Result;
use sea_orm::{ColumnTrait, QueryFilter};

#[derive(Clone)]
pub struct UsersRepository {
    base: BaseRepository<UserEntity>,
}

impl UsersRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            base: BaseRepository::new(pool, UserColumn::Id),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.base.find_by_id(id).await
    }

    /// Look up a user by wallet address, the stable external handle
    pub async fn find_by_address(&self, address: &str) -> Result<Option<User>> {
        self.base
            .all()
            .filter(UserColumn::Address.eq(address))
            .one(self.base.pool().read())
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_address_returns_none_for_unknown() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<User>::new()])
            .into_connection();
        let repo = UsersRepository::new(DbPool {
            primary: conn,
            replica: None,
        });

        let found = repo.find_by_address("0xdead").await.unwrap();
        assert!(found.is_none());
    }
}
