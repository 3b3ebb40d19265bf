//! Bounties repository
//!
//! Listings join each page of bounties with the owner's profile, the tag
//! relation, and the owner's rating summaries. All decoration is batched:
//! owners, tags, and ratings each cost a fixed number of queries per page.

use crate::db::models::{Bounty, BountyColumn, BountyEntity, Tag, User, UserColumn, UserEntity};
use crate::db::repository::reviews::display_handle;
use crate::db::repository::{BaseRepository, PageRequest, ReviewsRepository, TagsRepository};
use crate::db::DbPool;
use crate::errors::Result;
use crate::ratings::{Rated, UserRatings};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Owner profile attached to a listed bounty
#[derive(Debug, Clone, Serialize)]
pub struct BountyOwner {
    pub id: i64,
    pub address: String,
    pub display_name: String,
    pub ratings: UserRatings,
}

impl BountyOwner {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            address: user.address.clone(),
            display_name: user
                .name
                .clone()
                .unwrap_or_else(|| display_handle(&user.address)),
            ratings: UserRatings::default(),
        }
    }
}

/// A bounty decorated for the listing response
#[derive(Debug, Clone, Serialize)]
pub struct BountyListing {
    #[serde(flatten)]
    pub bounty: Bounty,
    pub owner: Option<BountyOwner>,
    pub tags: Vec<Tag>,
}

impl Rated for BountyListing {
    fn rated_user_id(&self) -> i64 {
        self.bounty.owner_id
    }

    fn set_user_ratings(&mut self, ratings: UserRatings) {
        if let Some(owner) = &mut self.owner {
            owner.ratings = ratings;
        }
    }
}

#[derive(Clone)]
pub struct BountiesRepository {
    base: BaseRepository<BountyEntity>,
    tags: TagsRepository,
    reviews: ReviewsRepository,
}

impl BountiesRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            base: BaseRepository::new(pool.clone(), BountyColumn::Id),
            tags: TagsRepository::new(pool.clone()),
            reviews: ReviewsRepository::new(pool),
        }
    }

    /// One page of bounties with owner profiles, tags, and owner ratings
    pub async fn list(&self, page: &PageRequest) -> Result<Vec<BountyListing>> {
        let bounties = self.base.paginate(page).await?;
        if bounties.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids: HashSet<i64> = bounties.iter().map(|bounty| bounty.owner_id).collect();
        let owners: HashMap<i64, User> = UserEntity::find()
            .filter(UserColumn::Id.is_in(owner_ids))
            .all(self.base.pool().read())
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let bounty_ids: Vec<i64> = bounties.iter().map(|bounty| bounty.id).collect();
        let mut tags = self.tags.tags_for_bounties(&bounty_ids).await?;

        let mut listings: Vec<BountyListing> = bounties
            .into_iter()
            .map(|bounty| {
                let owner = owners.get(&bounty.owner_id).map(BountyOwner::from_user);
                let tags = tags.remove(&bounty.id).unwrap_or_default();
                BountyListing {
                    bounty,
                    owner,
                    tags,
                }
            })
            .collect();

        self.reviews.attach_user_ratings(&mut listings).await?;
        Ok(listings)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Bounty>> {
        self.base.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn bounty(id: i64, owner_id: i64) -> Bounty {
        Bounty {
            id,
            owner_id,
            title: "Port the indexer".to_string(),
            value: 250.0,
            status: "open".to_string(),
            experience: "intermediate".to_string(),
            bounty_type: "development".to_string(),
            created_at: chrono::Utc::now().into(),
        }
    }

    fn user(id: i64, name: Option<&str>) -> User {
        User {
            id,
            address: "0xabcdef0123456789abcdef0123456789abcdef01".to_string(),
            name: name.map(|n| n.to_string()),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_list_decorates_with_owner_tags_and_ratings() {
        let rating_row: BTreeMap<&str, Value> = BTreeMap::from([
            ("user_id", Value::BigInt(Some(7))),
            ("rating", Value::SmallInt(Some(5))),
            ("from_owner", Value::Bool(Some(false))),
        ]);
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            // Page of bounties
            .append_query_results([vec![bounty(1, 7), bounty(2, 7)]])
            // Owners, batched
            .append_query_results([vec![user(7, None)]])
            // Pivots, then tags
            .append_query_results([vec![crate::db::models::BountyTag {
                bounty_id: 1,
                tag_id: 4,
            }]])
            .append_query_results([vec![Tag {
                id: 4,
                title: "rust".to_string(),
                created_at: chrono::Utc::now().into(),
            }]])
            // Ratings, batched
            .append_query_results([vec![rating_row]])
            .into_connection();
        let pool = DbPool {
            primary: conn,
            replica: None,
        };
        let repo = BountiesRepository::new(pool.clone());

        let listings = repo.list(&PageRequest::default()).await.unwrap();

        assert_eq!(listings.len(), 2);
        let owner = listings[0].owner.as_ref().unwrap();
        assert_eq!(owner.display_name, "0xabcd…ef01");
        assert_eq!(owner.ratings.bounties.rating, 5.0);
        assert_eq!(listings[0].tags.len(), 1);
        assert!(listings[1].tags.is_empty());
        // Bounties, owners, pivots, tags, ratings: five queries for the page
        assert_eq!(pool.primary.into_transaction_log().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_page_issues_single_query() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Bounty>::new()])
            .into_connection();
        let pool = DbPool {
            primary: conn,
            replica: None,
        };
        let repo = BountiesRepository::new(pool.clone());

        let listings = repo.list(&PageRequest::default()).await.unwrap();
        assert!(listings.is_empty());
        assert_eq!(pool.primary.into_transaction_log().len(), 1);
    }
}
