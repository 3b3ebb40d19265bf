//! Bounty handlers

use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use talentboard_common::db::{BountiesRepository, BountyListing, PageRequest};
use talentboard_common::errors::Result;

#[derive(Debug, Default, Deserialize)]
pub struct ListBountiesQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// List bounties with owner profiles, tags, and owner ratings
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListBountiesQuery>,
) -> Result<Json<Vec<BountyListing>>> {
    super::check_page_size(query.page_size)?;

    let listings = BountiesRepository::new(state.db.clone())
        .list(&PageRequest {
            page: query.page,
            size: query.page_size,
        })
        .await?;

    Ok(Json(listings))
}
