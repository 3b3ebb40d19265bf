//! Resources repository
//!
//! Resource creation is a two-phase write: the row is inserted first, tags
//! are resolved and linked, then the slug is derived from the assigned id
//! and persisted. There is no compensating rollback; a failure after the
//! parent insert surfaces as `PartialWrite` so operators can reconcile the
//! orphaned row from logs.

use crate::db::models::{
    Resource, ResourceActiveModel, ResourceColumn, ResourceEntity, Tag, TagColumn, TagEntity,
};
use crate::db::repository::tags::normalize_titles;
use crate::db::repository::{page_range, BaseRepository, PageRequest, TagsRepository};
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::slug::make_slug;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fields supplied by the caller when creating a resource
#[derive(Debug, Clone, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub author: String,
    pub description: String,
    pub category_id: i64,
    pub resource_url: String,
    pub image_url: Option<String>,
    pub curator_address: Option<String>,
}

/// Listing filters for published resources
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    pub page: PageRequest,
    pub categories: Vec<i64>,
    pub tags: Vec<String>,
}

/// A resource with its tag relation reconstructed from the pivot table
#[derive(Debug, Clone, Serialize)]
pub struct ResourceWithTags {
    #[serde(flatten)]
    pub resource: Resource,
    pub tags: Vec<Tag>,
}

#[derive(Clone)]
pub struct ResourcesRepository {
    base: BaseRepository<ResourceEntity>,
    tags: TagsRepository,
}

impl ResourcesRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            base: BaseRepository::new(pool.clone(), ResourceColumn::Id),
            tags: TagsRepository::new(pool),
        }
    }

    fn pool(&self) -> &DbPool {
        self.base.pool()
    }

    /// Insert a resource, link its tags, then derive and persist the slug.
    ///
    /// The slug needs the server-assigned id, so it cannot be computed
    /// before the insert. Steps after the insert map store failures to
    /// `PartialWrite` instead of a plain database error.
    pub async fn create_with_tags(
        &self,
        new: NewResource,
        raw_tags: &[String],
    ) -> Result<ResourceWithTags> {
        let inserted = self
            .base
            .create(ResourceActiveModel {
                title: Set(new.title),
                author: Set(new.author),
                description: Set(new.description),
                category_id: Set(new.category_id),
                resource_url: Set(new.resource_url),
                image_url: Set(new.image_url),
                curator_address: Set(new.curator_address),
                slug: Set(None),
                published_at: Set(None),
                created_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            })
            .await?;

        let tags = self
            .tags
            .assign_resource_tags(inserted.id, raw_tags)
            .await
            .map_err(|err| partial_write(inserted.id, format!("tag assignment failed: {err}")))?;

        let slug = make_slug(&inserted.title, inserted.id);
        let resource = self
            .base
            .update(
                inserted.id,
                ResourceActiveModel {
                    slug: Set(Some(slug)),
                    ..Default::default()
                },
            )
            .await
            .map_err(|err| partial_write(inserted.id, format!("slug update failed: {err}")))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                partial_write(inserted.id, "slug update matched no row".to_string())
            })?;

        Ok(ResourceWithTags { resource, tags })
    }

    /// One page of published resources, optionally narrowed by category ids
    /// and tag titles, with tags attached via the batched read-side
    pub async fn list_published(&self, query: &ResourceQuery) -> Result<Vec<ResourceWithTags>> {
        let mut select = self
            .base
            .all()
            .filter(ResourceColumn::PublishedAt.is_not_null());

        if !query.categories.is_empty() {
            select = select.filter(ResourceColumn::CategoryId.is_in(query.categories.clone()));
        }

        if !query.tags.is_empty() {
            let tagged_ids = self.resource_ids_tagged(&query.tags).await?;
            if tagged_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(ResourceColumn::Id.is_in(tagged_ids));
        }

        let range = page_range(&query.page);
        let rows = select
            .offset(range.from)
            .limit(range.limit())
            .all(self.pool().read())
            .await?;

        self.attach_tags(rows).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Resource>> {
        self.base.find_by_id(id).await
    }

    /// Resource ids carrying at least one of the given tag titles
    async fn resource_ids_tagged(&self, raw_titles: &[String]) -> Result<Vec<i64>> {
        use crate::db::models::{ResourceTagColumn, ResourceTagEntity};

        let titles = normalize_titles(raw_titles);
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let tag_ids: Vec<i64> = TagEntity::find()
            .filter(TagColumn::Title.is_in(titles))
            .select_only()
            .column(TagColumn::Id)
            .into_tuple()
            .all(self.pool().read())
            .await?;
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let pivots = ResourceTagEntity::find()
            .filter(ResourceTagColumn::TagId.is_in(tag_ids))
            .all(self.pool().read())
            .await?;

        let distinct: HashSet<i64> = pivots.into_iter().map(|pivot| pivot.resource_id).collect();
        Ok(distinct.into_iter().collect())
    }

    async fn attach_tags(&self, rows: Vec<Resource>) -> Result<Vec<ResourceWithTags>> {
        let ids: Vec<i64> = rows.iter().map(|resource| resource.id).collect();
        let mut grouped = self.tags.tags_for_resources(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|resource| {
                let tags = grouped.remove(&resource.id).unwrap_or_default();
                ResourceWithTags { resource, tags }
            })
            .collect())
    }
}

fn partial_write(id: i64, message: String) -> AppError {
    AppError::PartialWrite {
        resource_type: "resources".to_string(),
        id: id.to_string(),
        message,
    }
}
