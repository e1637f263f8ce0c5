pub mod review;

/// Everything mounted under the API prefix.
pub fn api() -> Vec<rocket::Route> {
    routes![
        // Reviews
        review::get_hostaway_reviews,
        review::get_public_reviews_for_property,
        review::get_property_details,
        // Approvals
        review::get_all_approvals,
        review::update_approval_status,
        review::bulk_update_approvals,
        // Google Places
        review::get_google_place_rating,
    ]
}
