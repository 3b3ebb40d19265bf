//! Review listing handler

use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use talentboard_common::db::{Review, ReviewFilter, ReviewKind, ReviewsRepository};
use talentboard_common::errors::{AppError, Result};
use talentboard_common::metrics;

#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    /// Required listing kind: "bounty" or "application"
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub bounty_id: Option<i64>,
    pub reviewer_id: Option<i64>,
    pub user_id: Option<i64>,
}

fn parse_kind(raw: Option<&str>) -> Result<ReviewKind> {
    match raw {
        Some("bounty") => Ok(ReviewKind::Bounty),
        Some("application") => Ok(ReviewKind::Application),
        _ => Err(AppError::invalid_field(
            "type",
            "type must be bounty or application",
        )),
    }
}

/// List reviews for one kind with optional filters
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListReviewsQuery>,
) -> Result<Json<Vec<Review>>> {
    let kind = parse_kind(query.kind.as_deref())?;

    let reviews = ReviewsRepository::new(state.db.clone())
        .list(&ReviewFilter {
            kind,
            bounty_id: query.bounty_id,
            reviewer_id: query.reviewer_id,
            user_id: query.user_id,
        })
        .await?;

    let kind_label = match kind {
        ReviewKind::Bounty => "bounty",
        ReviewKind::Application => "application",
    };
    metrics::record_review_list(kind_label, reviews.len());

    Ok(Json(reviews))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_required_and_closed() {
        assert_eq!(parse_kind(Some("bounty")).unwrap(), ReviewKind::Bounty);
        assert_eq!(
            parse_kind(Some("application")).unwrap(),
            ReviewKind::Application
        );
        assert!(parse_kind(Some("owner")).is_err());
        assert!(parse_kind(None).is_err());
    }
}
