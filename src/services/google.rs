use reqwest::Client;

use crate::config::Config;

const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

/// Google Places lookups for a listing's aggregate rating.
///
/// The Places API only exposes `rating` and `user_ratings_total` for a place.
/// Individual Google reviews require the Business Profile API plus business
/// verification, so per-review data is out of reach and this service never
/// feeds the aggregation path.
pub struct GooglePlacesService {
    api_key: Option<String>,
}

impl GooglePlacesService {
    pub fn from_config() -> Self {
        Self::new(Config::google_places_api_key())
    }

    pub fn new(api_key: Option<String>) -> Self {
        GooglePlacesService { api_key }
    }

    fn api_key(&self) -> Result<&str, String> {
        self.api_key
            .as_deref()
            .ok_or_else(|| "GOOGLE_PLACES_API_KEY not configured".to_string())
    }

    /// Aggregate rating and total ratings count for a place id. Missing key
    /// is a hard error here; this path has no fail-open default.
    pub async fn get_place_details(&self, place_id: &str) -> Result<serde_json::Value, String> {
        let key = self.api_key()?;

        let res = Client::new()
            .get(format!("{}/details/json", PLACES_API_BASE))
            .query(&[
                ("place_id", place_id),
                ("key", key),
                ("fields", "rating,user_ratings_total"),
            ])
            .send()
            .await
            .map_err(|e| format!("Google Places request failed: {}", e))?;

        if !res.status().is_success() {
            return Err(format!("Google Places returned {}", res.status()));
        }

        res.json()
            .await
            .map_err(|e| format!("Google Places response was not JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rocket::async_test]
    async fn test_missing_api_key_is_a_hard_error() {
        let service = GooglePlacesService::new(None);
        let err = service.get_place_details("ChIJdd4hrwug2EcRmSrV3Vo6llI").await;
        assert!(err.is_err());
        assert!(err.unwrap_err().contains("GOOGLE_PLACES_API_KEY"));
    }
}
