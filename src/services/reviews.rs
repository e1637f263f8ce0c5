use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use log::{error, warn};
use std::collections::HashMap;
use std::fs;

use crate::config::Config;
use crate::models::{
    CategoryBreakdown, Channel, HostawayReview, NormalizedReview, PropertyDetails,
    PropertySummary, PublicReview, PublicReviewsResponse, ReviewStatus, ReviewsResponse,
    ReviewsSummary,
};
use crate::services::HostawayService;
use crate::store::{ApprovalMap, ApprovalStore};

pub struct ReviewsService;

impl ReviewsService {
    /// Full normalized review set plus summary statistics. Source data and
    /// approval state are two independent reads, recomputed on every call;
    /// nothing is cached.
    pub async fn get_all_reviews(
        hostaway: &HostawayService,
        store: &ApprovalStore,
    ) -> ReviewsResponse {
        let hostaway_data = hostaway.fetch_reviews().await;
        let approvals = store.get_all();

        let reviews: Vec<NormalizedReview> = hostaway_data
            .result
            .into_iter()
            .map(|review| Self::normalize(review, &approvals))
            .collect();

        let summary = Self::calculate_summary(&reviews);

        ReviewsResponse { reviews, summary }
    }

    /// The subset of reviews eligible for a property's public page: exact
    /// listing match, manager-approved, and published. Everything else is
    /// projected away.
    pub async fn get_public_reviews_for_property(
        hostaway: &HostawayService,
        store: &ApprovalStore,
        property_id: &str,
    ) -> PublicReviewsResponse {
        let all_reviews = Self::get_all_reviews(hostaway, store).await;

        let reviews: Vec<PublicReview> = all_reviews
            .reviews
            .into_iter()
            .filter(|review| {
                review.listing_name == property_id
                    && review.approved_for_public
                    && review.status == ReviewStatus::Published
            })
            .map(|review| PublicReview {
                id: review.id,
                guest_name: review.guest_name,
                rating: review.rating,
                public_review: review.public_review,
                review_category: review.review_category,
                submitted_at: review.submitted_at,
            })
            .collect();

        let average_rating = Self::average_rating(reviews.iter().map(|r| r.rating));
        let total_count = reviews.len();

        PublicReviewsResponse {
            reviews,
            average_rating,
            total_count,
        }
    }

    /// Static descriptive record for a listing. Unknown id or an unreadable
    /// fixture yields `None`, never an error.
    pub fn get_property_details(property_id: &str) -> Option<PropertyDetails> {
        let path = Config::properties_mock_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error loading property details from {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<HashMap<String, PropertyDetails>>(&raw) {
            Ok(mut properties) => properties.remove(property_id),
            Err(e) => {
                error!("Invalid property details in {}: {}", path.display(), e);
                None
            }
        }
    }

    fn normalize(review: HostawayReview, approvals: &ApprovalMap) -> NormalizedReview {
        let approved_for_public = approvals.get(&review.id).copied().unwrap_or(false);

        NormalizedReview {
            id: review.id,
            review_type: review.review_type,
            status: review.status,
            rating: review.rating,
            public_review: review.public_review,
            review_category: review.review_category,
            submitted_at: Self::parse_submitted_at(&review.submitted_at),
            guest_name: review.guest_name,
            listing_name: review.listing_name,
            channel: Channel::Hostaway,
            approved_for_public,
        }
    }

    // Hostaway sends "2020-08-21 22:45:14"; RFC 3339 accepted as well.
    fn parse_submitted_at(raw: &str) -> DateTime<Utc> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return naive.and_utc();
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.with_timezone(&Utc);
        }
        warn!("Unparseable submission timestamp {:?}, substituting epoch", raw);
        DateTime::UNIX_EPOCH
    }

    pub(crate) fn calculate_summary(reviews: &[NormalizedReview]) -> ReviewsSummary {
        let total_reviews = reviews.len();
        let average_rating = Self::average_rating(reviews.iter().map(|r| r.rating));

        let published_count = reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Published)
            .count();
        let pending_count = reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Pending)
            .count();
        let draft_count = reviews
            .iter()
            .filter(|r| r.status == ReviewStatus::Draft)
            .count();

        // Group by listing, first-occurrence order
        let mut property_groups: IndexMap<&str, Vec<&NormalizedReview>> = IndexMap::new();
        for review in reviews {
            property_groups
                .entry(review.listing_name.as_str())
                .or_default()
                .push(review);
        }

        let by_property: Vec<PropertySummary> = property_groups
            .into_iter()
            .map(|(property_name, group)| PropertySummary {
                property_name: property_name.to_string(),
                average_rating: Self::average_rating(group.iter().map(|r| r.rating)),
                total_reviews: group.len(),
                review_count: group.len(),
            })
            .collect();

        // (sum, rated-entry count) per category; unrated entries contribute
        // to neither, so a category with no rated entries never appears
        let mut category_totals: IndexMap<&str, (f64, usize)> = IndexMap::new();
        for review in reviews {
            for entry in &review.review_category {
                if let Some(rating) = entry.rating {
                    let slot = category_totals.entry(entry.category.as_str()).or_insert((0.0, 0));
                    slot.0 += rating;
                    slot.1 += 1;
                }
            }
        }

        let by_category: Vec<CategoryBreakdown> = category_totals
            .into_iter()
            .map(|(category, (sum, count))| CategoryBreakdown {
                category: category.to_string(),
                average_rating: round1(sum / count as f64),
                review_count: count,
            })
            .collect();

        ReviewsSummary {
            total_reviews,
            average_rating,
            published_count,
            pending_count,
            draft_count,
            by_property,
            by_category,
        }
    }

    /// Mean of the defined ratings only; absent ratings count toward neither
    /// sum nor denominator. Exactly 0 when nothing is rated.
    fn average_rating(ratings: impl Iterator<Item = Option<f64>>) -> f64 {
        let defined: Vec<f64> = ratings.flatten().collect();
        if defined.is_empty() {
            return 0.0;
        }
        round1(defined.iter().sum::<f64>() / defined.len() as f64)
    }
}

/// One decimal place, half away from zero on `value * 10`.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReviewCategory, ReviewType};

    fn review(
        id: i64,
        rating: Option<f64>,
        status: ReviewStatus,
        listing: &str,
        approved: bool,
    ) -> NormalizedReview {
        NormalizedReview {
            id,
            review_type: ReviewType::GuestToHost,
            status,
            rating,
            public_review: format!("review {}", id),
            review_category: Vec::new(),
            submitted_at: DateTime::UNIX_EPOCH,
            guest_name: format!("Guest {}", id),
            listing_name: listing.to_string(),
            channel: Channel::Hostaway,
            approved_for_public: approved,
        }
    }

    #[test]
    fn test_round1_half_away_from_zero() {
        assert_eq!(round1(4.15), 4.2);
        assert_eq!(round1(4.25), 4.3);
        assert_eq!(round1(4.24), 4.2);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_average_excludes_unrated_reviews() {
        let reviews = vec![
            review(1, Some(5.0), ReviewStatus::Published, "A", false),
            review(2, Some(3.0), ReviewStatus::Published, "A", false),
            review(3, None, ReviewStatus::Published, "A", false),
        ];
        let summary = ReviewsService::calculate_summary(&reviews);
        // (5 + 3) / 2, the unrated review is in neither sum nor count
        assert_eq!(summary.average_rating, 4.0);
        assert_eq!(summary.total_reviews, 3);
    }

    #[test]
    fn test_average_of_no_rated_reviews_is_zero() {
        let reviews = vec![
            review(1, None, ReviewStatus::Published, "A", false),
            review(2, None, ReviewStatus::Draft, "A", false),
        ];
        let summary = ReviewsService::calculate_summary(&reviews);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.by_property[0].average_rating, 0.0);
    }

    #[test]
    fn test_status_counts_are_exact() {
        let reviews = vec![
            review(1, Some(4.0), ReviewStatus::Published, "A", false),
            review(2, Some(4.0), ReviewStatus::Pending, "A", false),
            review(3, Some(4.0), ReviewStatus::Pending, "B", false),
            review(4, Some(4.0), ReviewStatus::Draft, "B", false),
        ];
        let summary = ReviewsService::calculate_summary(&reviews);
        assert_eq!(summary.published_count, 1);
        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.draft_count, 1);
    }

    #[test]
    fn test_per_property_breakdown_groups_by_listing() {
        let reviews = vec![
            review(1, Some(5.0), ReviewStatus::Published, "A", false),
            review(2, Some(3.0), ReviewStatus::Pending, "A", false),
            review(3, None, ReviewStatus::Published, "B", false),
        ];
        let summary = ReviewsService::calculate_summary(&reviews);
        assert_eq!(summary.by_property.len(), 2);

        let a = &summary.by_property[0];
        assert_eq!(a.property_name, "A");
        assert_eq!(a.average_rating, 4.0);
        assert_eq!(a.review_count, 2);
        assert_eq!(a.total_reviews, 2);

        let b = &summary.by_property[1];
        assert_eq!(b.property_name, "B");
        assert_eq!(b.average_rating, 0.0);
        assert_eq!(b.review_count, 1);
    }

    #[test]
    fn test_category_breakdown_skips_unrated_entries() {
        let mut first = review(1, Some(5.0), ReviewStatus::Published, "A", false);
        first.review_category = vec![
            ReviewCategory { category: "cleanliness".into(), rating: Some(4.0) },
            ReviewCategory { category: "location".into(), rating: None },
        ];
        let mut second = review(2, Some(4.0), ReviewStatus::Published, "A", false);
        second.review_category = vec![
            ReviewCategory { category: "cleanliness".into(), rating: Some(4.3) },
            ReviewCategory { category: "location".into(), rating: None },
        ];

        let summary = ReviewsService::calculate_summary(&[first, second]);
        // "location" has zero rated entries and must not appear at all
        assert_eq!(summary.by_category.len(), 1);
        let cleanliness = &summary.by_category[0];
        assert_eq!(cleanliness.category, "cleanliness");
        // (4.0 + 4.3) / 2 = 4.15 -> 4.2
        assert_eq!(cleanliness.average_rating, 4.2);
        assert_eq!(cleanliness.review_count, 2);
    }

    #[test]
    fn test_normalize_joins_approval_with_default_false() {
        let raw: HostawayReview = serde_json::from_value(serde_json::json!({
            "id": 42,
            "type": "guest-to-host",
            "status": "published",
            "rating": 5,
            "publicReview": "Spotless.",
            "reviewCategory": [],
            "submittedAt": "2024-03-12 14:30:22",
            "guestName": "Maya",
            "listingName": "A"
        }))
        .unwrap();

        let mut approvals = ApprovalMap::new();
        let normalized = ReviewsService::normalize(raw.clone(), &approvals);
        assert!(!normalized.approved_for_public);
        assert_eq!(normalized.channel, Channel::Hostaway);

        approvals.insert(42, true);
        let normalized = ReviewsService::normalize(raw, &approvals);
        assert!(normalized.approved_for_public);
    }

    #[test]
    fn test_parse_submitted_at_formats() {
        let hostaway = ReviewsService::parse_submitted_at("2020-08-21 22:45:14");
        assert_eq!(hostaway.to_rfc3339(), "2020-08-21T22:45:14+00:00");

        let rfc3339 = ReviewsService::parse_submitted_at("2020-08-21T22:45:14Z");
        assert_eq!(rfc3339, hostaway);

        // Unparseable input degrades to the epoch instead of failing
        let garbage = ReviewsService::parse_submitted_at("yesterday-ish");
        assert_eq!(garbage, DateTime::UNIX_EPOCH);
    }
}
