use chrono::{DateTime, Utc};
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum ReviewType {
    #[serde(rename = "guest-to-host")]
    GuestToHost,
    #[serde(rename = "host-to-guest")]
    HostToGuest,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Published,
    Draft,
    Pending,
}

/// Originating review platform. A single channel in this deployment.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Hostaway,
}

/// One row of a review's category scorecard. Category names are open-ended;
/// the rating may be absent.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ReviewCategory {
    pub category: String,
    pub rating: Option<f64>,
}

/// A review exactly as the Hostaway API returns it. Immutable once fetched.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostawayReview {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub rating: Option<f64>,
    pub public_review: String,
    pub review_category: Vec<ReviewCategory>,
    pub submitted_at: String,
    pub guest_name: String,
    pub listing_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct HostawayApiResponse {
    pub status: String,
    pub result: Vec<HostawayReview>,
}

/// A Hostaway review with the timestamp parsed, the channel tagged and the
/// manager's approval decision joined in. Built fresh on every request,
/// never persisted.
#[derive(Debug, Serialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub rating: Option<f64>,
    pub public_review: String,
    pub review_category: Vec<ReviewCategory>,
    pub submitted_at: DateTime<Utc>,
    pub guest_name: String,
    pub listing_name: String,
    pub channel: Channel,
    pub approved_for_public: bool,
}

/// One entry of a bulk approval update.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatus {
    pub review_id: i64,
    pub approved: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ApproveReviewDto {
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostaway_review_wire_format() {
        let raw = r#"{
            "id": 7453,
            "type": "guest-to-host",
            "status": "published",
            "rating": 4.5,
            "publicReview": "Lovely stay.",
            "reviewCategory": [
                { "category": "cleanliness", "rating": 5 },
                { "category": "communication", "rating": null }
            ],
            "submittedAt": "2024-03-12 14:30:22",
            "guestName": "Shane Finkelstein",
            "listingName": "2B N1 A - 29 Shoreditch Heights"
        }"#;

        let review: HostawayReview = serde_json::from_str(raw).unwrap();
        assert_eq!(review.id, 7453);
        assert_eq!(review.review_type, ReviewType::GuestToHost);
        assert_eq!(review.status, ReviewStatus::Published);
        assert_eq!(review.rating, Some(4.5));
        assert_eq!(review.review_category.len(), 2);
        assert_eq!(review.review_category[1].rating, None);
        assert_eq!(review.listing_name, "2B N1 A - 29 Shoreditch Heights");
    }

    #[test]
    fn test_channel_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Channel::Hostaway).unwrap(),
            "\"hostaway\""
        );
    }
}
