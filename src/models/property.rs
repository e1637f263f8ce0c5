use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, JsonSchema)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Static descriptive record for a listing, keyed by its display name.
/// Read-only reference data.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct PropertyDetails {
    pub title: String,
    pub address: String,
    pub guests: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub beds: u32,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub location: Location,
    pub description: String,
}
