use serde::{Deserialize, Serialize};

pub mod idea;
pub mod places;

pub use idea::*;
pub use places::*;

/// Body of `POST /details`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaDetailsRequest {
    pub address: String,
    pub idea_type: String,
}

/// Query string of `GET|HEAD /photo`
///
/// Both fields are optional at the extractor level so that a missing
/// parameter produces the service's own 400 message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoQuery {
    pub photo_reference: Option<String>,
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoReferenceEntry {
    pub photo_reference: String,
}

/// Body of `GET /photos/{place_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoListResponse {
    pub photos: Vec<PhotoReferenceEntry>,
}

impl PhotoListResponse {
    pub fn from_references(references: Vec<String>) -> Self {
        Self {
            photos: references
                .into_iter()
                .map(|photo_reference| PhotoReferenceEntry { photo_reference })
                .collect(),
        }
    }
}
