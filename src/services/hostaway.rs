use log::{debug, error};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::models::HostawayApiResponse;

const HOSTAWAY_API_BASE: &str = "https://api.hostaway.com/v1";

/// Review source backed by Hostaway.
///
/// Both the account id and the API key are required. The sandbox account
/// exposes no review data, so a static fixture shaped exactly like the live
/// `/reviews` response stands in for the API call.
pub struct HostawayService {
    account_id: Option<String>,
    api_key: Option<String>,
    mock_path: PathBuf,
}

impl HostawayService {
    pub fn from_config() -> Self {
        Self::new(
            Config::hostaway_account_id(),
            Config::hostaway_api_key(),
            Config::reviews_mock_path(),
        )
    }

    pub fn new(
        account_id: Option<String>,
        api_key: Option<String>,
        mock_path: impl Into<PathBuf>,
    ) -> Self {
        HostawayService {
            account_id,
            api_key,
            mock_path: mock_path.into(),
        }
    }

    /// Never fails to its caller: on missing credentials or an unreadable
    /// payload it logs the cause and returns an empty successful result, so
    /// review display degrades to "no reviews" instead of breaking the
    /// dashboard.
    pub async fn fetch_reviews(&self) -> HostawayApiResponse {
        match self.load() {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching reviews from Hostaway: {}", e);
                HostawayApiResponse {
                    status: "success".to_string(),
                    result: Vec::new(),
                }
            }
        }
    }

    fn load(&self) -> Result<HostawayApiResponse, String> {
        if self.account_id.is_none() || self.api_key.is_none() {
            return Err("Hostaway credentials are not configured".to_string());
        }

        debug!(
            "Serving fixture {} in place of {}/reviews",
            self.mock_path.display(),
            HOSTAWAY_API_BASE
        );

        let raw = fs::read_to_string(&self.mock_path)
            .map_err(|e| format!("failed to read {}: {}", self.mock_path.display(), e))?;
        serde_json::from_str(&raw).map_err(|e| format!("invalid reviews payload: {}", e))
    }
}
