//! Resource handlers: creation and published listing
//!
//! Creation validates static field rules first, then the dynamic category
//! domain (current category ids), and only then touches the write path.
//! The thumbnail request at the end is detached; its outcome never shapes
//! the response.

use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use talentboard_common::db::{
    CategoriesRepository, NewResource, PageRequest, ResourceQuery, ResourceWithTags,
    ResourcesRepository,
};
use talentboard_common::errors::{AppError, Result};
use talentboard_common::metrics;
use validator::Validate;

/// Request to create a new resource
#[derive(Debug, Deserialize, Validate)]
pub struct CreateResourceRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,

    #[validate(length(
        min = 30,
        max = 256,
        message = "description must be between 30 and 256 characters"
    ))]
    pub description: String,

    pub category_id: i64,

    #[validate(url(message = "resource_url must be a well-formed URL"))]
    pub resource_url: String,

    /// Raw tag titles; blanks are dropped during assignment
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub curator_address: Option<String>,
}

/// Query parameters for the published-resources listing
#[derive(Debug, Default, Deserialize)]
pub struct ListResourcesQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,

    /// Comma-separated category ids
    pub categories: Option<String>,

    /// Comma-separated tag titles
    pub tags: Option<String>,
}

/// Create a resource with tags and a derived slug
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<ResourceWithTags>)> {
    request.validate()?;

    let valid_ids = CategoriesRepository::new(state.db.clone()).ids().await?;
    if !valid_ids.contains(&request.category_id) {
        return Err(AppError::invalid_field("category_id", "Invalid Category"));
    }

    let repo = ResourcesRepository::new(state.db.clone());
    let created = repo
        .create_with_tags(
            NewResource {
                title: request.title,
                author: request.author,
                description: request.description,
                category_id: request.category_id,
                resource_url: request.resource_url,
                image_url: request.image_url,
                curator_address: request.curator_address,
            },
            &request.tags,
        )
        .await?;

    // Detached: the response does not wait on the image service
    state
        .thumbnailer
        .request_detached(created.resource.id, created.resource.resource_url.clone());

    metrics::record_resource_created(created.tags.len());
    tracing::info!(
        resource_id = created.resource.id,
        slug = ?created.resource.slug,
        tag_count = created.tags.len(),
        "Resource created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// List published resources, filtered and paginated
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListResourcesQuery>,
) -> Result<Json<Vec<ResourceWithTags>>> {
    super::check_page_size(query.page_size)?;

    let categories = match query.categories.as_deref() {
        Some(raw) => {
            let requested = parse_id_list(raw)?;
            let valid_ids = CategoriesRepository::new(state.db.clone()).ids().await?;
            if requested.iter().any(|id| !valid_ids.contains(id)) {
                return Err(AppError::invalid_field("categories", "Invalid Category"));
            }
            requested
        }
        None => Vec::new(),
    };

    let tags = query.tags.as_deref().map(parse_title_list).unwrap_or_default();

    let repo = ResourcesRepository::new(state.db.clone());
    let page = repo
        .list_published(&ResourceQuery {
            page: PageRequest {
                page: query.page,
                size: query.page_size,
            },
            categories,
            tags,
        })
        .await?;

    metrics::record_resource_page(page.len());
    Ok(Json(page))
}

/// Parse a comma-separated id list; non-numeric entries reject the request
fn parse_id_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| AppError::invalid_field("categories", "Invalid Category"))
        })
        .collect()
}

fn parse_title_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use talentboard_common::chain::ChainContext;
    use talentboard_common::config::AppConfig;
    use talentboard_common::db::DbPool;
    use talentboard_common::errors::AppError;
    use talentboard_common::media::ThumbnailClient;

    fn state_with(pool: DbPool) -> AppState {
        let config = AppConfig::default();
        AppState {
            thumbnailer: ThumbnailClient::new(&config.thumbnailer),
            chain: Arc::new(ChainContext::new(&config.chain)),
            config: Arc::new(config),
            db: pool,
        }
    }

    fn valid_request() -> CreateResourceRequest {
        CreateResourceRequest {
            title: "My Great Post".to_string(),
            author: "satoshi".to_string(),
            description: "a".repeat(40),
            category_id: 1,
            resource_url: "https://example.com/post".to_string(),
            tags: vec!["defi".to_string(), "nft".to_string()],
            image_url: None,
            curator_address: None,
        }
    }

    fn id_row(id: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("id", Value::BigInt(Some(id)))])
    }

    #[test]
    fn test_short_description_names_the_field() {
        let mut request = valid_request();
        request.description = "too short".to_string();

        let err: AppError = request.validate().unwrap_err().into();
        match err {
            AppError::Validation { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "description");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_url_is_rejected() {
        let mut request = valid_request();
        request.resource_url = "not a url".to_string();
        assert!(request.validate().is_err());
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected_before_any_write() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![id_row(1), id_row(2)]])
            .into_connection();
        let pool = DbPool {
            primary: conn,
            replica: None,
        };
        let state = state_with(pool.clone());

        let mut request = valid_request();
        request.category_id = 99;

        let err = create(State(state), Json(request)).await.unwrap_err();
        match err {
            AppError::Validation { errors } => {
                assert_eq!(errors[0].field, "category_id");
                assert_eq!(errors[0].message, "Invalid Category");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Only the category-domain lookup ran
        assert_eq!(pool.primary.into_transaction_log().len(), 1);
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list("").unwrap(), Vec::<i64>::new());
        assert!(parse_id_list("1,defi").is_err());
    }

    #[test]
    fn test_parse_title_list_drops_blanks() {
        assert_eq!(parse_title_list("defi, ,nft"), vec!["defi", "nft"]);
    }
}
