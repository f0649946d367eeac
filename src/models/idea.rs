//! Idea records returned to the trip planning client.
//!
//! An [`Idea`] is built fresh for every request from a single upstream search
//! result and is never persisted. Each variant serializes to the flat JSON
//! object the client expects; optional fields are emitted as `null`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Category tag selecting which idea variant to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaCategory {
    Accommodation,
    Activity,
    Eating,
    Sightseeing,
    Travel,
}

impl IdeaCategory {
    pub const ALL: [IdeaCategory; 5] = [
        IdeaCategory::Accommodation,
        IdeaCategory::Activity,
        IdeaCategory::Eating,
        IdeaCategory::Sightseeing,
        IdeaCategory::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaCategory::Accommodation => "accommodation",
            IdeaCategory::Activity => "activity",
            IdeaCategory::Eating => "eating",
            IdeaCategory::Sightseeing => "sightseeing",
            IdeaCategory::Travel => "travel",
        }
    }
}

impl fmt::Display for IdeaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaCategory {
    type Err = AppError;

    /// Case-insensitive exact match against the five known tags
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(IdeaCategory::as_str).collect();
                AppError::validation(format!(
                    "Invalid idea_type: '{}'. Must be one of: {}",
                    tag,
                    valid.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Easy,
    Moderate,
    Challenging,
    Extreme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationIdea {
    pub name: String,
    pub photos: Vec<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub accommodation_type: String,
    pub price: i32,
    pub address: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityIdea {
    pub name: String,
    pub photos: Vec<String>,
    pub notes: Option<String>,
    pub duration: Option<String>,
    pub price: i32,
    pub location: String,
    pub difficulty: DifficultyLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EatingIdea {
    pub name: String,
    pub photos: Vec<String>,
    pub notes: Option<String>,
    pub cuisine: String,
    pub price: i32,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightseeingIdea {
    pub name: String,
    pub photos: Vec<String>,
    pub notes: Option<String>,
    pub location: String,
    pub price: i32,
    pub opening_hours: Option<String>,
    pub best_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelIdea {
    pub name: String,
    pub photos: Vec<String>,
    pub notes: Option<String>,
    pub transport_type: String,
    #[serde(rename = "from_address")]
    pub from_address: String,
    #[serde(rename = "to_address")]
    pub to_address: String,
    pub duration: Option<String>,
    pub cost: i32,
}

/// One of the five normalized idea shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Idea {
    Accommodation(AccommodationIdea),
    Activity(ActivityIdea),
    Eating(EatingIdea),
    Sightseeing(SightseeingIdea),
    Travel(TravelIdea),
}

impl Idea {
    pub fn category(&self) -> IdeaCategory {
        match self {
            Idea::Accommodation(_) => IdeaCategory::Accommodation,
            Idea::Activity(_) => IdeaCategory::Activity,
            Idea::Eating(_) => IdeaCategory::Eating,
            Idea::Sightseeing(_) => IdeaCategory::Sightseeing,
            Idea::Travel(_) => IdeaCategory::Travel,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Idea::Accommodation(idea) => &idea.name,
            Idea::Activity(idea) => &idea.name,
            Idea::Eating(idea) => &idea.name,
            Idea::Sightseeing(idea) => &idea.name,
            Idea::Travel(idea) => &idea.name,
        }
    }

    pub fn photos(&self) -> &[String] {
        match self {
            Idea::Accommodation(idea) => &idea.photos,
            Idea::Activity(idea) => &idea.photos,
            Idea::Eating(idea) => &idea.photos,
            Idea::Sightseeing(idea) => &idea.photos,
            Idea::Travel(idea) => &idea.photos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!("eating".parse::<IdeaCategory>().unwrap(), IdeaCategory::Eating);
        assert_eq!("Travel".parse::<IdeaCategory>().unwrap(), IdeaCategory::Travel);
        assert_eq!(
            "SIGHTSEEING".parse::<IdeaCategory>().unwrap(),
            IdeaCategory::Sightseeing
        );
    }

    #[test]
    fn test_unknown_category_names_the_tag() {
        let error = "InvalidIdeaType".parse::<IdeaCategory>().unwrap_err();
        assert!(matches!(error, AppError::Validation { .. }));
        assert_eq!(
            error.client_message(),
            "Invalid idea_type: 'InvalidIdeaType'. Must be one of: accommodation, activity, eating, sightseeing, travel"
        );
    }

    #[test]
    fn test_category_requires_exact_match() {
        assert!(" eating".parse::<IdeaCategory>().is_err());
        assert!("eat".parse::<IdeaCategory>().is_err());
        assert!("".parse::<IdeaCategory>().is_err());
    }

    #[test]
    fn test_accommodation_serializes_client_field_names() {
        let idea = Idea::Accommodation(AccommodationIdea {
            name: "Test Hotel Name".to_string(),
            photos: vec!["hotel_ref1".to_string()],
            notes: None,
            accommodation_type: "Hotel".to_string(),
            price: 3,
            address: "456 Test Ave".to_string(),
            check_in: None,
            check_out: None,
        });

        assert_eq!(
            serde_json::to_value(&idea).unwrap(),
            json!({
                "name": "Test Hotel Name",
                "photos": ["hotel_ref1"],
                "notes": null,
                "type": "Hotel",
                "price": 3,
                "address": "456 Test Ave",
                "checkIn": null,
                "checkOut": null
            })
        );
    }

    #[test]
    fn test_travel_serializes_address_fields_in_snake_case() {
        let idea = Idea::Travel(TravelIdea {
            name: "Travel Idea".to_string(),
            photos: vec![],
            notes: Some("note".to_string()),
            transport_type: "Car".to_string(),
            from_address: String::new(),
            to_address: String::new(),
            duration: None,
            cost: 0,
        });

        let value = serde_json::to_value(&idea).unwrap();
        assert_eq!(value["transportType"], "Car");
        assert_eq!(value["from_address"], "");
        assert_eq!(value["to_address"], "");
        assert_eq!(value["cost"], 0);
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DifficultyLevel::Challenging).unwrap(),
            json!("challenging")
        );
        assert_eq!(DifficultyLevel::default(), DifficultyLevel::Easy);
    }
}
