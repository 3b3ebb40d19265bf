//! Per-user rating summaries
//!
//! Ratings are derived on read, never stored. A user carries two facets:
//! reviews received as a bounty owner and reviews received as an applicant
//! (worker). Absent reviews yield an explicit zero-valued summary rather
//! than a missing field.

use serde::{Deserialize, Serialize};

/// Average rating plus review count for one facet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub rating: f64,
    pub nb_reviews: u32,
}

impl RatingSummary {
    /// Average a set of 1-5 ratings; empty input is the zero summary
    pub fn from_ratings(ratings: &[i16]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }

        let sum: i64 = ratings.iter().map(|rating| i64::from(*rating)).sum();
        Self {
            rating: sum as f64 / ratings.len() as f64,
            nb_reviews: ratings.len() as u32,
        }
    }
}

/// Both rating facets for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRatings {
    pub bounties: RatingSummary,
    pub applications: RatingSummary,
}

/// Items that embed a user reference and can carry that user's ratings.
///
/// Implemented by listing shapes (bounties with owners, profiles) so one
/// batched lookup can decorate a whole page of items.
pub trait Rated {
    /// The id of the user whose ratings decorate this item
    fn rated_user_id(&self) -> i64;

    /// Write the fetched (or zero-default) ratings back onto the item
    fn set_user_ratings(&mut self, ratings: UserRatings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ratings_are_zero() {
        let summary = RatingSummary::from_ratings(&[]);
        assert_eq!(summary.rating, 0.0);
        assert_eq!(summary.nb_reviews, 0);

        let ratings = UserRatings::default();
        assert_eq!(ratings.bounties, RatingSummary::default());
        assert_eq!(ratings.applications, RatingSummary::default());
    }

    #[test]
    fn test_average_over_facet() {
        let summary = RatingSummary::from_ratings(&[5, 4, 3]);
        assert_eq!(summary.rating, 4.0);
        assert_eq!(summary.nb_reviews, 3);
    }

    #[test]
    fn test_serializes_with_camel_case_count() {
        let json = serde_json::to_value(RatingSummary {
            rating: 4.5,
            nb_reviews: 2,
        })
        .unwrap();
        assert_eq!(json["nbReviews"], 2);
    }
}
