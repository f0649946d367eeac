//! Google Places source implementation
//!
//! Talks to both API families the service needs: the legacy text search
//! (`maps/api/place/textsearch/json`) and the newer place details and photo
//! media endpoints (`places.googleapis.com/v1`).

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::{PhotoMedia, PlacesApi};
use crate::config::UpstreamConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{PlacePhotosResponse, TextSearchResponse};

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";
const PHOTOS_FIELD_MASK: &str = "photos";

/// Google Places HTTP client
///
/// The API key is held in memory only and never logged.
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    legacy_base_url: Url,
    places_base_url: Url,
    max_width_px: u32,
    max_height_px: u32,
}

impl GooglePlacesClient {
    /// Create a new client using the upstream section of the configuration
    pub fn new(api_key: impl Into<String>, config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("places-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            legacy_base_url: parse_base_url("legacy_base_url", &config.legacy_base_url)?,
            places_base_url: parse_base_url("places_base_url", &config.places_base_url)?,
            max_width_px: config.max_width_px,
            max_height_px: config.max_height_px,
        })
    }

    fn text_search_url(&self) -> AppResult<Url> {
        endpoint(&self.legacy_base_url, ["textsearch", "json"])
    }

    fn place_details_url(&self, place_id: &str) -> AppResult<Url> {
        if place_id.is_empty() || is_dot_segment(place_id) {
            return Err(AppError::validation(format!("Invalid place_id: '{place_id}'")));
        }
        endpoint(&self.places_base_url, ["places", place_id])
    }

    /// `{places_base_url}/{photo_reference}/media`
    ///
    /// The reference is a resource name made of several path segments; each
    /// one is checked so a reference cannot climb out of the API root.
    fn photo_media_url(&self, photo_reference: &str) -> AppResult<Url> {
        let segments: Vec<&str> = photo_reference.split('/').collect();
        if segments
            .iter()
            .any(|segment| segment.is_empty() || is_dot_segment(segment))
        {
            return Err(AppError::validation(format!(
                "Invalid photo_reference: '{photo_reference}'"
            )));
        }
        endpoint(
            &self.places_base_url,
            segments.into_iter().chain(std::iter::once("media")),
        )
    }
}

fn parse_base_url(field: &str, value: &str) -> AppResult<Url> {
    let url = Url::parse(value)
        .map_err(|e| AppError::configuration(format!("Invalid upstream.{field} '{value}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(AppError::configuration(format!(
            "Invalid upstream.{field} '{value}': not a base URL"
        )));
    }
    Ok(url)
}

fn endpoint<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> AppResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::configuration(format!("Invalid upstream base URL '{base}'")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn text_search(&self, query: &str) -> AppResult<TextSearchResponse> {
        let url = self.text_search_url()?;
        debug!("Text search for query: {}", query);

        let response = self
            .client
            .get(url)
            .query(&[("query", query), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<TextSearchResponse>().await?)
    }

    async fn place_photos(&self, place_id: &str) -> AppResult<PlacePhotosResponse> {
        let url = self.place_details_url(place_id)?;
        debug!("Fetching photo list for place: {}", place_id);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, PHOTOS_FIELD_MASK)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(AppError::upstream_protocol(format!(
                "place details for '{}' returned HTTP {}",
                place_id,
                response.status()
            )));
        }

        Ok(response.json::<PlacePhotosResponse>().await?)
    }

    async fn photo_media(&self, photo_reference: &str) -> AppResult<PhotoMedia> {
        let url = self.photo_media_url(photo_reference)?;

        let response = self
            .client
            .get(url)
            .query(&[
                ("maxHeightPx", self.max_height_px.to_string()),
                ("maxWidthPx", self.max_width_px.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Photo media request returned HTTP {}", status);
            return Ok(PhotoMedia::Unavailable {
                status: status.as_u16(),
            });
        }

        Ok(PhotoMedia::Available(Box::pin(
            response.bytes_stream().map_err(AppError::from),
        )))
    }
}
