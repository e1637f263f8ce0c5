use chrono::{DateTime, Utc};
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;

use super::review::ReviewCategory;

/// The fields of a review that are safe for the public property page.
/// No status, no approval flag.
#[derive(Debug, Serialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicReview {
    pub id: i64,
    pub guest_name: String,
    pub rating: Option<f64>,
    pub public_review: String,
    pub review_category: Vec<ReviewCategory>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicReviewsResponse {
    pub reviews: Vec<PublicReview>,
    pub average_rating: f64,
    pub total_count: usize,
}
