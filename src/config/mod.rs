use rocket::Config as RocketConfig;
use rocket::figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::env;
use std::path::PathBuf;

pub struct Config;

impl Config {
    fn figment() -> Figment {
        // Get the current profile
        let profile = env::var("ROCKET_PROFILE").unwrap_or_else(|_| "development".to_string());

        Figment::from(RocketConfig::default())
            .merge(Toml::file("Rocket.toml").nested())
            .select(&profile)
            .merge(Env::prefixed("ROCKET_"))
    }

    pub fn data_dir() -> PathBuf {
        Self::figment()
            .extract_inner("data_dir")
            .unwrap_or_else(|_| PathBuf::from("data"))
    }

    /// The one mutable file in the system: review id -> approved flag.
    pub fn approvals_file() -> PathBuf {
        Self::data_dir().join("approvals.json")
    }

    pub fn reviews_mock_path() -> PathBuf {
        Self::figment()
            .extract_inner("reviews_mock_path")
            .unwrap_or_else(|_| PathBuf::from("mocks/reviews.json"))
    }

    pub fn properties_mock_path() -> PathBuf {
        Self::figment()
            .extract_inner("properties_mock_path")
            .unwrap_or_else(|_| PathBuf::from("mocks/properties.json"))
    }

    pub fn hostaway_account_id() -> Option<String> {
        Self::figment().extract_inner("hostaway_account_id").ok()
    }

    pub fn hostaway_api_key() -> Option<String> {
        Self::figment().extract_inner("hostaway_api_key").ok()
    }

    pub fn is_hostaway_enabled() -> bool {
        Self::hostaway_account_id().is_some() && Self::hostaway_api_key().is_some()
    }

    pub fn google_places_api_key() -> Option<String> {
        Self::figment().extract_inner("google_places_api_key").ok()
    }
}
