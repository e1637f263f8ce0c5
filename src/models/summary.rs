use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;

use super::review::NormalizedReview;

/// Per-listing slice of the summary. `total_reviews` and `review_count` carry
/// the same value; the dashboard consumes both names.
#[derive(Debug, Serialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub property_name: String,
    pub average_rating: f64,
    pub total_reviews: usize,
    pub review_count: usize,
}

/// Per-category slice of the summary, over rated entries only.
#[derive(Debug, Serialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub average_rating: f64,
    pub review_count: usize,
}

#[derive(Debug, Serialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsSummary {
    pub total_reviews: usize,
    pub average_rating: f64,
    pub published_count: usize,
    pub pending_count: usize,
    pub draft_count: usize,
    pub by_property: Vec<PropertySummary>,
    pub by_category: Vec<CategoryBreakdown>,
}

#[derive(Debug, Serialize, Clone, JsonSchema)]
pub struct ReviewsResponse {
    pub reviews: Vec<NormalizedReview>,
    pub summary: ReviewsSummary,
}
