//! Category handlers

use crate::AppState;
use axum::{extract::State, Json};
use talentboard_common::db::CategoriesRepository;
use talentboard_common::db::models::Category;
use talentboard_common::errors::Result;

/// List all categories
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoriesRepository::new(state.db.clone()).list().await?;
    Ok(Json(categories))
}
