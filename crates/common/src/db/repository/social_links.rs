//! Social links repository

use crate::db::models::{SocialLink, SocialLinkColumn, SocialLinkEntity};
use crate::db::repository::BaseRepository;
use crate::db::DbPool;
use crate::errors::Result;
use sea_orm::{ColumnTrait, QueryFilter};

#[derive(Clone)]
pub struct SocialLinksRepository {
    base: BaseRepository<SocialLinkEntity>,
}

impl SocialLinksRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            base: BaseRepository::new(pool, SocialLinkColumn::Id),
        }
    }

    /// All links attached to one user's profile
    pub async fn for_user(&self, user_id: i64) -> Result<Vec<SocialLink>> {
        self.base
            .all()
            .filter(SocialLinkColumn::UserId.eq(user_id))
            .all(self.base.pool().read())
            .await
            .map_err(Into::into)
    }
}
