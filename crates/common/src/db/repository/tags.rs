//! Tag resolution and pivot assignment
//!
//! Tags are globally deduplicated by normalized title. Assignment resolves
//! the requested titles against existing rows, bulk-creates the missing
//! ones, and inserts one pivot row per (parent, tag) pair. The resolved
//! tags are handed back for in-memory attachment; the parent row itself
//! never stores them.

use crate::db::models::{
    BountyTagActiveModel, BountyTagColumn, BountyTagEntity, ResourceTagActiveModel,
    ResourceTagColumn, ResourceTagEntity, Tag, TagActiveModel, TagColumn, TagEntity,
};
use crate::db::repository::BaseRepository;
use crate::db::DbPool;
use crate::errors::Result;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use std::collections::{HashMap, HashSet};

/// Normalize raw tag titles: trim, drop blanks, lowercase, dedupe.
///
/// Order of first occurrence is preserved so the caller's tag ordering
/// survives into the response.
pub fn normalize_titles(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|title| title.trim().to_lowercase())
        .filter(|title| !title.is_empty())
        .filter(|title| seen.insert(title.clone()))
        .collect()
}

/// Repository for tags and their pivot tables
#[derive(Clone)]
pub struct TagsRepository {
    tags: BaseRepository<TagEntity>,
    resource_tags: BaseRepository<ResourceTagEntity>,
    bounty_tags: BaseRepository<BountyTagEntity>,
}

impl TagsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            tags: BaseRepository::new(pool.clone(), TagColumn::Id),
            resource_tags: BaseRepository::unkeyed(pool.clone()),
            bounty_tags: BaseRepository::unkeyed(pool),
        }
    }

    fn pool(&self) -> &DbPool {
        self.tags.pool()
    }

    /// Resolve raw titles to tag rows, creating the ones that do not exist.
    ///
    /// Returns the union of pre-existing and newly-created tags, each with
    /// a persisted id. Blank titles are dropped during normalization.
    pub async fn resolve(&self, raw_titles: &[String]) -> Result<Vec<Tag>> {
        let titles = normalize_titles(raw_titles);
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let existing = TagEntity::find()
            .filter(TagColumn::Title.is_in(titles.clone()))
            .all(self.pool().read())
            .await?;

        let known: HashSet<&str> = existing.iter().map(|tag| tag.title.as_str()).collect();
        let missing: Vec<TagActiveModel> = titles
            .iter()
            .filter(|title| !known.contains(title.as_str()))
            .map(|title| TagActiveModel {
                title: Set(title.clone()),
                created_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            })
            .collect();

        let created = self.tags.create_many(missing).await?;

        let mut resolved = existing;
        resolved.extend(created);
        Ok(resolved)
    }

    /// Resolve titles and link them to a resource via bulk pivot insert
    pub async fn assign_resource_tags(
        &self,
        resource_id: i64,
        raw_titles: &[String],
    ) -> Result<Vec<Tag>> {
        let tags = self.resolve(raw_titles).await?;

        let pivots: Vec<ResourceTagActiveModel> = tags
            .iter()
            .map(|tag| ResourceTagActiveModel {
                resource_id: Set(resource_id),
                tag_id: Set(tag.id),
            })
            .collect();
        self.resource_tags.create_many_minimal(pivots).await?;

        Ok(tags)
    }

    /// Resolve titles and link them to a bounty via bulk pivot insert
    pub async fn assign_bounty_tags(
        &self,
        bounty_id: i64,
        raw_titles: &[String],
    ) -> Result<Vec<Tag>> {
        let tags = self.resolve(raw_titles).await?;

        let pivots: Vec<BountyTagActiveModel> = tags
            .iter()
            .map(|tag| BountyTagActiveModel {
                bounty_id: Set(bounty_id),
                tag_id: Set(tag.id),
            })
            .collect();
        self.bounty_tags.create_many_minimal(pivots).await?;

        Ok(tags)
    }

    /// Tags for a set of resources, reconstructed from the pivot table in
    /// two queries regardless of how many parents are requested
    pub async fn tags_for_resources(&self, resource_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>> {
        if resource_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let pivots = ResourceTagEntity::find()
            .filter(ResourceTagColumn::ResourceId.is_in(resource_ids.to_vec()))
            .all(self.pool().read())
            .await?;

        let pairs: Vec<(i64, i64)> = pivots
            .into_iter()
            .map(|pivot| (pivot.resource_id, pivot.tag_id))
            .collect();
        self.tags_for_pairs(pairs).await
    }

    /// Tags for a set of bounties; same two-query shape as resources
    pub async fn tags_for_bounties(&self, bounty_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>> {
        if bounty_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let pivots = BountyTagEntity::find()
            .filter(BountyTagColumn::BountyId.is_in(bounty_ids.to_vec()))
            .all(self.pool().read())
            .await?;

        let pairs: Vec<(i64, i64)> = pivots
            .into_iter()
            .map(|pivot| (pivot.bounty_id, pivot.tag_id))
            .collect();
        self.tags_for_pairs(pairs).await
    }

    async fn tags_for_pairs(&self, pairs: Vec<(i64, i64)>) -> Result<HashMap<i64, Vec<Tag>>> {
        if pairs.is_empty() {
            return Ok(HashMap::new());
        }

        let tag_ids: HashSet<i64> = pairs.iter().map(|(_, tag_id)| *tag_id).collect();
        let tags = TagEntity::find()
            .filter(TagColumn::Id.is_in(tag_ids))
            .all(self.pool().read())
            .await?;
        let by_id: HashMap<i64, Tag> = tags.into_iter().map(|tag| (tag.id, tag)).collect();

        let mut grouped: HashMap<i64, Vec<Tag>> = HashMap::new();
        for (parent_id, tag_id) in pairs {
            if let Some(tag) = by_id.get(&tag_id) {
                grouped.entry(parent_id).or_default().push(tag.clone());
            }
        }
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

    fn pool_with(conn: DatabaseConnection) -> DbPool {
        DbPool {
            primary: conn,
            replica: None,
        }
    }

    fn tag(id: i64, title: &str) -> Tag {
        Tag {
            id,
            title: title.to_string(),
            created_at: chrono::Utc::now().into(),
        }
    }

    fn titles(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_drops_blanks_and_dedupes() {
        let normalized = normalize_titles(&titles(&["rust", "rust", "RUST", "  ", ""]));
        assert_eq!(normalized, vec!["rust"]);
    }

    #[test]
    fn test_normalize_preserves_first_occurrence_order() {
        let normalized = normalize_titles(&titles(&["NFT", " defi ", "nft", "dao"]));
        assert_eq!(normalized, vec!["nft", "defi", "dao"]);
    }

    #[tokio::test]
    async fn test_resolve_reuses_existing_rows() {
        // All requested titles already exist, so no insert is issued.
        let pool = pool_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![tag(1, "rust"), tag(2, "defi")]])
                .into_connection(),
        );
        let repo = TagsRepository::new(pool.clone());

        let resolved = repo.resolve(&titles(&["rust", "RUST", "defi"])).await.unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(pool.primary.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_creates_missing_rows() {
        let pool = pool_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![tag(1, "rust")]])
                .append_query_results([vec![tag(7, "zk")]])
                .into_connection(),
        );
        let repo = TagsRepository::new(pool.clone());

        let resolved = repo.resolve(&titles(&["rust", "zk"])).await.unwrap();

        let resolved_titles: Vec<&str> = resolved.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(resolved_titles, vec!["rust", "zk"]);
        // One select plus one bulk insert
        assert_eq!(pool.primary.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_assign_resource_tags_inserts_one_pivot_per_tag() {
        let pool = pool_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![tag(1, "defi"), tag(2, "nft")]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                }])
                .into_connection(),
        );
        let repo = TagsRepository::new(pool.clone());

        let tags = repo
            .assign_resource_tags(42, &titles(&["defi", "nft"]))
            .await
            .unwrap();

        assert_eq!(tags.len(), 2);
        // Select existing tags, then the minimal-return pivot insert
        assert_eq!(pool.primary.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_assign_with_only_blank_titles_touches_nothing() {
        let pool = pool_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let repo = TagsRepository::new(pool.clone());

        let tags = repo
            .assign_resource_tags(42, &titles(&["", "   "]))
            .await
            .unwrap();

        assert!(tags.is_empty());
        assert!(pool.primary.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_tags_for_resources_is_two_queries() {
        use crate::db::models::ResourceTag;

        let pool = pool_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    ResourceTag {
                        resource_id: 10,
                        tag_id: 1,
                    },
                    ResourceTag {
                        resource_id: 10,
                        tag_id: 2,
                    },
                    ResourceTag {
                        resource_id: 11,
                        tag_id: 1,
                    },
                ]])
                .append_query_results([vec![tag(1, "rust"), tag(2, "defi")]])
                .into_connection(),
        );
        let repo = TagsRepository::new(pool.clone());

        let grouped = repo.tags_for_resources(&[10, 11, 12]).await.unwrap();

        assert_eq!(grouped[&10].len(), 2);
        assert_eq!(grouped[&11].len(), 1);
        assert!(!grouped.contains_key(&12));
        assert_eq!(pool.primary.into_transaction_log().len(), 2);
    }
}
