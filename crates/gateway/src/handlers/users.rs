//! User profile handler

use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use talentboard_common::db::models::SocialLink;
use talentboard_common::db::{
    display_handle, ReviewsRepository, SocialLinksRepository, UsersRepository,
};
use talentboard_common::errors::{AppError, Result};
use talentboard_common::ratings::UserRatings;

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: i64,
    pub address: String,
    pub display_name: String,
    pub social_links: Vec<SocialLink>,
    pub ratings: UserRatings,
    pub created_at: String,
}

/// Profile for one user addressed by wallet address
pub async fn profile(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<UserProfileResponse>> {
    let user = UsersRepository::new(state.db.clone())
        .find_by_address(&address)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "users".to_string(),
            id: address,
        })?;

    let social_links = SocialLinksRepository::new(state.db.clone())
        .for_user(user.id)
        .await?;

    let ratings = ReviewsRepository::new(state.db.clone())
        .user_ratings(&[user.id])
        .await?
        .get(&user.id)
        .copied()
        .unwrap_or_default();

    Ok(Json(UserProfileResponse {
        id: user.id,
        display_name: user
            .name
            .clone()
            .unwrap_or_else(|| display_handle(&user.address)),
        address: user.address,
        social_links,
        ratings,
        created_at: user.created_at.to_rfc3339(),
    }))
}
