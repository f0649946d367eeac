//! Wire types for the upstream places provider.
//!
//! Only the fields the service reads are modelled; anything else in the
//! upstream payload is ignored. Collections are `Option` because the provider
//! omits them (or sends `null`) when empty.

use serde::{Deserialize, Serialize};

/// Status sentinel of a successful text search
pub const STATUS_OK: &str = "OK";
/// Status sentinel of a text search without matches
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Legacy text search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<PlaceResult>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<PlaceResultPhoto>>,
    #[serde(default)]
    pub price_level: Option<i32>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceResultPhoto {
    #[serde(default)]
    pub photo_reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Option<Vec<String>>,
}

impl PlaceResult {
    /// Photo references in upstream order, skipping entries without one
    pub fn photo_references(&self) -> Vec<String> {
        self.photos
            .iter()
            .flatten()
            .filter_map(|photo| photo.photo_reference.clone())
            .collect()
    }

    /// Upstream 0-4 price tier, 0 when absent
    pub fn price_tier(&self) -> i32 {
        self.price_level.unwrap_or(0)
    }

    pub fn types(&self) -> &[String] {
        self.types.as_deref().unwrap_or_default()
    }

    /// Weekday opening hours joined into a single line
    pub fn opening_hours_text(&self) -> Option<String> {
        self.opening_hours
            .as_ref()
            .and_then(|hours| hours.weekday_text.as_ref())
            .filter(|text| !text.is_empty())
            .map(|text| text.join(", "))
    }
}

/// Place details response restricted to the `photos` field mask
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacePhotosResponse {
    #[serde(default)]
    pub photos: Option<Vec<PlacePhoto>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacePhoto {
    /// Photo resource name, e.g. `places/{place_id}/photos/{token}`
    #[serde(default)]
    pub name: Option<String>,
}

impl PlacePhotosResponse {
    /// Photo resource names in upstream order, skipping entries without one
    pub fn photo_references(&self) -> Vec<String> {
        self.photos
            .iter()
            .flatten()
            .filter_map(|photo| photo.name.clone())
            .collect()
    }
}
