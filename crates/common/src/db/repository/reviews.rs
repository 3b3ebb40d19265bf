//! User reviews: filtered listing and batched rating aggregation
//!
//! Reviews are read through one join query (review, reviewer identity,
//! optional application and its bounty's owner), then narrowed by a
//! post-fetch predicate per listing kind and reshaped into a typed
//! `Review` that drops the joined application fields.

use crate::db::DbPool;
use crate::errors::Result;
use crate::ratings::{Rated, RatingSummary, UserRatings};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DbBackend, FromQueryResult, Statement, Value};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which review relation a listing targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    /// Reviews kept when the reviewer is the subject user
    Bounty,
    /// Reviews kept when the reviewer owns the application's bounty
    Application,
}

/// Filters for a review listing
#[derive(Debug, Clone)]
pub struct ReviewFilter {
    pub kind: ReviewKind,
    pub bounty_id: Option<i64>,
    pub reviewer_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// Reviewer identity attached to a listed review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerProfile {
    pub id: i64,
    pub address: String,
    pub display_name: String,
}

/// A review shaped for the listing response
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: i64,
    pub reviewer: ReviewerProfile,
    pub user_id: i64,
    pub bounty_id: Option<i64>,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTimeWithTimeZone,
}

/// Row shape of the review join query
#[derive(Debug, FromQueryResult)]
struct ReviewJoinRow {
    id: i64,
    reviewer_id: i64,
    user_id: i64,
    rating: i16,
    comment: String,
    created_at: DateTimeWithTimeZone,
    reviewer_address: String,
    reviewer_name: Option<String>,
    bounty_id: Option<i64>,
    bounty_owner_id: Option<i64>,
}

/// Row shape of the batched ratings query
#[derive(Debug, FromQueryResult)]
struct RatingRow {
    user_id: i64,
    rating: i16,
    from_owner: Option<bool>,
}

/// Shortened wallet handle used when a user has not set a display name
pub fn display_handle(address: &str) -> String {
    if !address.is_ascii() || address.len() <= 10 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

fn keep(kind: ReviewKind, row: &ReviewJoinRow) -> bool {
    match kind {
        ReviewKind::Application => row.bounty_owner_id == Some(row.reviewer_id),
        ReviewKind::Bounty => row.reviewer_id == row.user_id,
    }
}

fn shape(row: ReviewJoinRow) -> Review {
    let display_name = row
        .reviewer_name
        .unwrap_or_else(|| display_handle(&row.reviewer_address));

    Review {
        id: row.id,
        reviewer: ReviewerProfile {
            id: row.reviewer_id,
            address: row.reviewer_address,
            display_name,
        },
        user_id: row.user_id,
        bounty_id: row.bounty_id,
        rating: row.rating,
        comment: row.comment,
        created_at: row.created_at,
    }
}

fn fold_rating_rows(rows: Vec<RatingRow>) -> HashMap<i64, UserRatings> {
    let mut per_user: HashMap<i64, (Vec<i16>, Vec<i16>)> = HashMap::new();
    for row in rows {
        let (bounties, applications) = per_user.entry(row.user_id).or_default();
        // A review from the bounty owner rates the user as an applicant;
        // everything else rates them as an owner.
        if row.from_owner == Some(true) {
            applications.push(row.rating);
        } else {
            bounties.push(row.rating);
        }
    }

    per_user
        .into_iter()
        .map(|(user_id, (bounties, applications))| {
            (
                user_id,
                UserRatings {
                    bounties: RatingSummary::from_ratings(&bounties),
                    applications: RatingSummary::from_ratings(&applications),
                },
            )
        })
        .collect()
}

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: DbPool,
}

impl ReviewsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List reviews for one kind, optionally narrowed by bounty, reviewer,
    /// or subject user. Equality filters run in the store; the kind
    /// predicate runs post-fetch on the joined rows.
    pub async fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(bounty_id) = filter.bounty_id {
            values.push(bounty_id.into());
            conditions.push(format!("a.bounty_id = ${}", values.len()));
        }
        if let Some(reviewer_id) = filter.reviewer_id {
            values.push(reviewer_id.into());
            conditions.push(format!("r.reviewer_id = ${}", values.len()));
        }
        if let Some(user_id) = filter.user_id {
            values.push(user_id.into());
            conditions.push(format!("r.user_id = ${}", values.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT r.id, r.reviewer_id, r.user_id, r.rating, r.comment, r.created_at,
                   u.address AS reviewer_address, u.name AS reviewer_name,
                   a.bounty_id AS bounty_id, b.owner_id AS bounty_owner_id
            FROM user_reviews r
            JOIN users u ON u.id = r.reviewer_id
            LEFT JOIN bounty_applications a ON a.id = r.application_id
            LEFT JOIN bounties b ON b.id = a.bounty_id
            {where_clause}
            ORDER BY r.created_at DESC
            "#
        );

        let rows = ReviewJoinRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(self.pool.read())
        .await?;

        Ok(rows
            .into_iter()
            .filter(|row| keep(filter.kind, row))
            .map(shape)
            .collect())
    }

    /// Rating summaries for a set of users in ONE query regardless of input
    /// size. Users with no reviews are absent from the result; callers fill
    /// in the zero default.
    pub async fn user_ratings(&self, user_ids: &[i64]) -> Result<HashMap<i64, UserRatings>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders: Vec<String> = (1..=user_ids.len()).map(|n| format!("${n}")).collect();
        let sql = format!(
            r#"
            SELECT r.user_id, r.rating, (b.owner_id = r.reviewer_id) AS from_owner
            FROM user_reviews r
            LEFT JOIN bounty_applications a ON a.id = r.application_id
            LEFT JOIN bounties b ON b.id = a.bounty_id
            WHERE r.user_id IN ({})
            "#,
            placeholders.join(", ")
        );
        let values: Vec<Value> = user_ids.iter().map(|id| (*id).into()).collect();

        let rows = RatingRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(self.pool.read())
        .await?;

        Ok(fold_rating_rows(rows))
    }

    /// Decorate a batch of items with their users' rating summaries.
    ///
    /// Collects the distinct user ids, performs the single batched lookup,
    /// and writes the summary (zero-default when absent) onto each item.
    pub async fn attach_user_ratings<T: Rated>(&self, items: &mut [T]) -> Result<()> {
        let distinct: HashSet<i64> = items.iter().map(|item| item.rated_user_id()).collect();
        if distinct.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = distinct.into_iter().collect();
        let ratings = self.user_ratings(&ids).await?;

        for item in items.iter_mut() {
            let summary = ratings
                .get(&item.rated_user_id())
                .copied()
                .unwrap_or_default();
            item.set_user_ratings(summary);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::BTreeMap;

    fn join_row(
        id: i64,
        reviewer_id: i64,
        user_id: i64,
        bounty_owner_id: Option<i64>,
    ) -> ReviewJoinRow {
        ReviewJoinRow {
            id,
            reviewer_id,
            user_id,
            rating: 5,
            comment: "solid work".to_string(),
            created_at: chrono::Utc::now().into(),
            reviewer_address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
            reviewer_name: None,
            bounty_id: bounty_owner_id.map(|_| 300),
            bounty_owner_id,
        }
    }

    #[test]
    fn test_application_kind_keeps_owner_authored_reviews() {
        // Bounty owned by user 1, application by user 2. The owner's review
        // of the worker survives; the worker's review of the owner does not.
        let owner_reviews_worker = join_row(10, 1, 2, Some(1));
        let worker_reviews_owner = join_row(11, 2, 1, Some(1));

        assert!(keep(ReviewKind::Application, &owner_reviews_worker));
        assert!(!keep(ReviewKind::Application, &worker_reviews_owner));
    }

    #[test]
    fn test_application_kind_drops_rows_without_a_bounty() {
        let no_application = join_row(12, 1, 2, None);
        assert!(!keep(ReviewKind::Application, &no_application));
    }

    #[test]
    fn test_bounty_kind_keeps_self_referential_rows() {
        assert!(keep(ReviewKind::Bounty, &join_row(13, 1, 1, None)));
        assert!(!keep(ReviewKind::Bounty, &join_row(14, 2, 1, None)));
    }

    #[test]
    fn test_display_name_falls_back_to_shortened_handle() {
        let mut row = join_row(15, 1, 2, None);
        let shaped = shape(row);
        assert_eq!(shaped.reviewer.display_name, "0x1234…5678");

        row = join_row(16, 1, 2, None);
        row.reviewer_name = Some("alice".to_string());
        let shaped = shape(row);
        assert_eq!(shaped.reviewer.display_name, "alice");
    }

    #[test]
    fn test_short_addresses_are_not_truncated() {
        assert_eq!(display_handle("0xabc"), "0xabc");
    }

    #[test]
    fn test_fold_splits_facets_by_review_origin() {
        let rows = vec![
            RatingRow {
                user_id: 2,
                rating: 5,
                from_owner: Some(true),
            },
            RatingRow {
                user_id: 2,
                rating: 3,
                from_owner: Some(true),
            },
            RatingRow {
                user_id: 2,
                rating: 4,
                from_owner: Some(false),
            },
            RatingRow {
                user_id: 2,
                rating: 2,
                from_owner: None,
            },
        ];

        let folded = fold_rating_rows(rows);
        let ratings = folded[&2];
        assert_eq!(ratings.applications.rating, 4.0);
        assert_eq!(ratings.applications.nb_reviews, 2);
        assert_eq!(ratings.bounties.rating, 3.0);
        assert_eq!(ratings.bounties.nb_reviews, 2);
    }

    struct RatedItem {
        user_id: i64,
        ratings: UserRatings,
    }

    impl Rated for RatedItem {
        fn rated_user_id(&self) -> i64 {
            self.user_id
        }

        fn set_user_ratings(&mut self, ratings: UserRatings) {
            self.ratings = ratings;
        }
    }

    #[tokio::test]
    async fn test_attach_is_one_lookup_and_defaults_to_zero() {
        let rating_row: BTreeMap<&str, Value> = BTreeMap::from([
            ("user_id", Value::BigInt(Some(1))),
            ("rating", Value::SmallInt(Some(4))),
            ("from_owner", Value::Bool(Some(true))),
        ]);
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![rating_row]])
            .into_connection();
        let repo = ReviewsRepository::new(DbPool {
            primary: conn,
            replica: None,
        });

        let mut items = vec![
            RatedItem {
                user_id: 1,
                ratings: UserRatings::default(),
            },
            RatedItem {
                user_id: 1,
                ratings: UserRatings::default(),
            },
            RatedItem {
                user_id: 9,
                ratings: UserRatings::default(),
            },
        ];

        repo.attach_user_ratings(&mut items).await.unwrap();

        assert_eq!(items[0].ratings.applications.rating, 4.0);
        assert_eq!(items[1].ratings.applications.nb_reviews, 1);
        // User 9 has no reviews: explicit zero summary, not a missing field
        assert_eq!(items[2].ratings, UserRatings::default());
        // One batched query for three items
        assert_eq!(repo.pool.primary.into_transaction_log().len(), 1);
    }
}
