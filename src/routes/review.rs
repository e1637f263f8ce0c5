use log::info;
use rocket::State;
use rocket::serde::json::Json;
use rocket_okapi::openapi;

use crate::models::{
    ApprovalStatus, ApproveReviewDto, PropertyDetails, PublicReviewsResponse, ReviewsResponse,
};
use crate::services::{GooglePlacesService, HostawayService, ReviewsService};
use crate::store::{ApprovalMap, ApprovalStore};
use crate::utils::{ApiError, ApiResponse};

#[openapi(tag = "Reviews")]
#[get("/reviews/hostaway")]
pub async fn get_hostaway_reviews(
    hostaway: &State<HostawayService>,
    store: &State<ApprovalStore>,
) -> Json<ApiResponse<ReviewsResponse>> {
    let response = ReviewsService::get_all_reviews(hostaway.inner(), store.inner()).await;
    Json(ApiResponse::success(response))
}

#[openapi(tag = "Reviews")]
#[get("/reviews/property/<property_id>/public")]
pub async fn get_public_reviews_for_property(
    hostaway: &State<HostawayService>,
    store: &State<ApprovalStore>,
    property_id: String,
) -> Json<ApiResponse<PublicReviewsResponse>> {
    let response =
        ReviewsService::get_public_reviews_for_property(hostaway.inner(), store.inner(), &property_id)
            .await;
    Json(ApiResponse::success(response))
}

/// Unknown listings answer with null data, not an error.
#[openapi(tag = "Reviews")]
#[get("/reviews/property/<property_id>/details")]
pub async fn get_property_details(property_id: String) -> Json<ApiResponse<PropertyDetails>> {
    Json(ApiResponse::found_or_null(
        ReviewsService::get_property_details(&property_id),
    ))
}

#[openapi(tag = "Approvals")]
#[get("/reviews/approvals")]
pub async fn get_all_approvals(store: &State<ApprovalStore>) -> Json<ApiResponse<ApprovalMap>> {
    Json(ApiResponse::success(store.get_all()))
}

#[openapi(tag = "Approvals")]
#[patch("/reviews/<id>/approve", data = "<dto>")]
pub async fn update_approval_status(
    store: &State<ApprovalStore>,
    id: i64,
    dto: Json<ApproveReviewDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    if id < 1 {
        return Err(ApiError::bad_request("Invalid review ID"));
    }

    info!(
        "Review {} approval {} -> {}",
        id,
        store.get_status(id),
        dto.approved
    );

    store
        .set_status(id, dto.approved)
        .map_err(|e| ApiError::storage(format!("Failed to persist approval: {}", e)))?;

    Ok(Json(ApiResponse::success(serde_json::json!({
        "reviewId": id,
        "approved": dto.approved
    }))))
}

#[openapi(tag = "Approvals")]
#[patch("/reviews/approvals/bulk", data = "<updates>")]
pub async fn bulk_update_approvals(
    store: &State<ApprovalStore>,
    updates: Json<Vec<ApprovalStatus>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    if updates.iter().any(|u| u.review_id < 1) {
        return Err(ApiError::bad_request("Invalid review ID in bulk update"));
    }

    store
        .bulk_set(&updates)
        .map_err(|e| ApiError::storage(format!("Failed to persist approvals: {}", e)))?;

    Ok(Json(ApiResponse::success_with_message(
        "Approvals updated",
        serde_json::json!({ "updated": updates.len() }),
    )))
}

/// Aggregate rating and total ratings count only; the Places API exposes no
/// per-review data.
#[openapi(tag = "Google")]
#[get("/reviews/google/<place_id>")]
pub async fn get_google_place_rating(
    google: &State<GooglePlacesService>,
    place_id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let details = google
        .get_place_details(&place_id)
        .await
        .map_err(ApiError::upstream)?;
    Ok(Json(ApiResponse::success(details)))
}
