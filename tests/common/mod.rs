#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use places_proxy::errors::{AppError, AppResult};
use places_proxy::models::{
    PlacePhoto, PlacePhotosResponse, PlaceResult, PlaceResultPhoto, TextSearchResponse,
};
use places_proxy::services::{IdeaMapper, PhotoCache};
use places_proxy::sources::{PhotoMedia, PlacesApi};
use places_proxy::web::{create_router, AppState};

/// Canned upstream replies
#[derive(Clone)]
pub enum SearchReply {
    Response(TextSearchResponse),
    Unavailable,
}

#[derive(Clone)]
pub enum MediaReply {
    Bytes(Vec<u8>),
    Status(u16),
}

/// In-process stand-in for the places provider that counts every call
#[derive(Default)]
pub struct FakePlaces {
    pub search: Mutex<Option<SearchReply>>,
    pub place_photos: Mutex<HashMap<String, Vec<String>>>,
    pub media: Mutex<HashMap<String, MediaReply>>,
    pub search_calls: AtomicUsize,
    pub details_calls: AtomicUsize,
    pub media_calls: AtomicUsize,
}

impl FakePlaces {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_search(&self, reply: SearchReply) {
        *self.search.lock().unwrap() = Some(reply);
    }

    pub fn set_place_photos(&self, place_id: &str, references: &[&str]) {
        self.place_photos.lock().unwrap().insert(
            place_id.to_string(),
            references.iter().map(|r| r.to_string()).collect(),
        );
    }

    pub fn set_media(&self, photo_reference: &str, reply: MediaReply) {
        self.media
            .lock()
            .unwrap()
            .insert(photo_reference.to_string(), reply);
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
            + self.details_calls.load(Ordering::SeqCst)
            + self.media_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesApi for FakePlaces {
    async fn text_search(&self, _query: &str) -> AppResult<TextSearchResponse> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        match self.search.lock().unwrap().clone() {
            Some(SearchReply::Response(response)) => Ok(response),
            Some(SearchReply::Unavailable) | None => {
                Err(AppError::upstream_unavailable("connection refused"))
            }
        }
    }

    async fn place_photos(&self, place_id: &str) -> AppResult<PlacePhotosResponse> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        let references = self
            .place_photos
            .lock()
            .unwrap()
            .get(place_id)
            .cloned()
            .ok_or_else(|| AppError::upstream_protocol("place details returned HTTP 404"))?;

        Ok(PlacePhotosResponse {
            photos: Some(
                references
                    .into_iter()
                    .map(|name| PlacePhoto { name: Some(name) })
                    .collect(),
            ),
        })
    }

    async fn photo_media(&self, photo_reference: &str) -> AppResult<PhotoMedia> {
        self.media_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.media.lock().unwrap().get(photo_reference).cloned();
        match reply {
            Some(MediaReply::Bytes(data)) => {
                let chunks: Vec<AppResult<Bytes>> = data
                    .chunks(4)
                    .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
                    .collect();
                Ok(PhotoMedia::Available(Box::pin(futures::stream::iter(chunks))))
            }
            Some(MediaReply::Status(status)) => Ok(PhotoMedia::Unavailable { status }),
            None => Ok(PhotoMedia::Unavailable { status: 400 }),
        }
    }
}

/// Router wired to a fake upstream and a cache rooted at `cache_dir`
pub fn test_app(places: Arc<FakePlaces>, cache_dir: &Path) -> Router {
    let places: Arc<dyn PlacesApi> = places;
    create_router(AppState {
        photo_cache: PhotoCache::new(cache_dir, places.clone()),
        idea_mapper: IdeaMapper::new(places),
    })
}

pub fn ok_search(results: Vec<PlaceResult>) -> TextSearchResponse {
    TextSearchResponse {
        status: "OK".to_string(),
        error_message: None,
        results: Some(results),
    }
}

pub fn status_search(status: &str, error_message: Option<&str>) -> TextSearchResponse {
    TextSearchResponse {
        status: status.to_string(),
        error_message: error_message.map(str::to_string),
        results: None,
    }
}

pub fn place(name: &str, address: &str, photo_references: &[&str]) -> PlaceResult {
    PlaceResult {
        name: Some(name.to_string()),
        formatted_address: Some(address.to_string()),
        photos: Some(
            photo_references
                .iter()
                .map(|r| PlaceResultPhoto {
                    photo_reference: Some(r.to_string()),
                })
                .collect(),
        ),
        ..PlaceResult::default()
    }
}
