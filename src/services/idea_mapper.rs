//! Idea mapper service
//!
//! Turns a free-text address search into one of the five idea shapes. The
//! first upstream result is treated as authoritative; there is no ranking or
//! disambiguation between similarly named places.
//!
//! Category-specific defaults and the cuisine candidate list are plain
//! constants so they can be tested without any HTTP involved.

use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::models::{
    AccommodationIdea, ActivityIdea, DifficultyLevel, EatingIdea, Idea, IdeaCategory,
    PlaceResult, SightseeingIdea, TextSearchResponse, TravelIdea, STATUS_OK,
    STATUS_ZERO_RESULTS,
};
use crate::sources::PlacesApi;

/// Upstream place types recognised as a cuisine, highest priority first
pub const CUISINE_CANDIDATES: [&str; 6] = [
    "restaurant",
    "cafe",
    "bakery",
    "bar",
    "meal_delivery",
    "meal_takeaway",
];

pub const DEFAULT_CUISINE: &str = "Restaurant";
pub const DEFAULT_ACCOMMODATION_TYPE: &str = "Hotel";
pub const DEFAULT_DIFFICULTY: DifficultyLevel = DifficultyLevel::Easy;
pub const DEFAULT_TRANSPORT_TYPE: &str = "Car";
pub const DEFAULT_TRAVEL_NAME: &str = "Travel Idea";
const NOTES_FALLBACK_NAME: &str = "this place";

#[derive(Clone)]
pub struct IdeaMapper {
    places: Arc<dyn PlacesApi>,
}

impl IdeaMapper {
    pub fn new(places: Arc<dyn PlacesApi>) -> Self {
        Self { places }
    }

    /// Search for `address` and build the idea selected by `category_tag`
    ///
    /// The tag is validated before any upstream call is made.
    pub async fn map_to_idea(&self, address: &str, category_tag: &str) -> AppResult<Idea> {
        let category: IdeaCategory = category_tag.parse()?;

        let response = self.places.text_search(address).await?;
        let place = first_result(response, address)?;
        let idea = build_idea(category, &place);

        info!(
            "Mapped '{}' to {} idea '{}' with {} photo(s)",
            address,
            category,
            idea.name(),
            idea.photos().len()
        );
        Ok(idea)
    }
}

/// Classify a text search response and take its first result
pub fn first_result(response: TextSearchResponse, address: &str) -> AppResult<PlaceResult> {
    match response.status.as_str() {
        STATUS_OK => {}
        STATUS_ZERO_RESULTS => {
            return Err(AppError::not_found(format!(
                "No places found for address: {address}"
            )));
        }
        status => {
            let message = match response.error_message.as_deref() {
                Some(detail) if !detail.is_empty() => format!("{status} - {detail}"),
                _ => status.to_string(),
            };
            return Err(AppError::upstream_protocol(message));
        }
    }

    let results = response.results.unwrap_or_default();
    debug!("Text search for '{}' returned {} result(s)", address, results.len());

    results.into_iter().next().ok_or_else(|| {
        AppError::not_found(format!(
            "No results found in Google Places API response for address: {address}"
        ))
    })
}

/// Build the idea variant for `category` from an upstream result
pub fn build_idea(category: IdeaCategory, place: &PlaceResult) -> Idea {
    let name = place.name.clone();
    let address = place.formatted_address.clone().unwrap_or_default();
    let photos = place.photo_references();
    let price = place.price_tier();
    let notes = Some(default_notes(name.as_deref()));

    match category {
        IdeaCategory::Accommodation => Idea::Accommodation(AccommodationIdea {
            name: name.unwrap_or_default(),
            photos,
            notes,
            accommodation_type: DEFAULT_ACCOMMODATION_TYPE.to_string(),
            price,
            address,
            check_in: None,
            check_out: None,
        }),
        IdeaCategory::Activity => Idea::Activity(ActivityIdea {
            name: name.unwrap_or_default(),
            photos,
            notes,
            duration: None,
            price,
            location: address,
            difficulty: DEFAULT_DIFFICULTY,
        }),
        IdeaCategory::Eating => Idea::Eating(EatingIdea {
            name: name.unwrap_or_default(),
            photos,
            notes,
            cuisine: infer_cuisine(place.types()),
            price,
            address,
        }),
        IdeaCategory::Sightseeing => Idea::Sightseeing(SightseeingIdea {
            name: name.unwrap_or_default(),
            photos,
            notes,
            location: address,
            price,
            opening_hours: place.opening_hours_text(),
            best_time: None,
        }),
        IdeaCategory::Travel => Idea::Travel(TravelIdea {
            name: name.unwrap_or_else(|| DEFAULT_TRAVEL_NAME.to_string()),
            photos,
            notes,
            transport_type: DEFAULT_TRANSPORT_TYPE.to_string(),
            from_address: String::new(),
            to_address: String::new(),
            duration: None,
            cost: price,
        }),
    }
}

/// First cuisine candidate present in `types`, title-cased
pub fn infer_cuisine(types: &[String]) -> String {
    CUISINE_CANDIDATES
        .iter()
        .find(|candidate| types.iter().any(|t| t == *candidate))
        .map(|candidate| title_case(candidate))
        .unwrap_or_else(|| DEFAULT_CUISINE.to_string())
}

fn title_case(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn default_notes(name: Option<&str>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or(NOTES_FALLBACK_NAME);
    format!("Details for {name} retrieved from Google Places.")
}
