//! Upstream places provider
//!
//! [`PlacesApi`] is the only seam between the core services and the network.
//! [`GooglePlacesClient`] is the production implementation; tests substitute
//! in-process fakes.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::errors::AppResult;
use crate::models::{PlacePhotosResponse, TextSearchResponse};

pub mod google_places;

pub use google_places::GooglePlacesClient;

/// Photo bytes as they arrive from the provider
pub type PhotoByteStream = BoxStream<'static, AppResult<Bytes>>;

/// Outcome of a photo media request that reached the provider
pub enum PhotoMedia {
    /// HTTP 200; the body is streamed
    Available(PhotoByteStream),
    /// Any other HTTP status
    Unavailable { status: u16 },
}

impl std::fmt::Debug for PhotoMedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoMedia::Available(_) => f.write_str("PhotoMedia::Available(..)"),
            PhotoMedia::Unavailable { status } => {
                write!(f, "PhotoMedia::Unavailable {{ status: {status} }}")
            }
        }
    }
}

/// Calls against the upstream places provider
///
/// Errors follow the service taxonomy: a provider that cannot be reached is
/// `UpstreamUnavailable`, a response that cannot be understood is
/// `UpstreamProtocol`.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Legacy free-text search
    async fn text_search(&self, query: &str) -> AppResult<TextSearchResponse>;

    /// Place details restricted to the `photos` field
    async fn place_photos(&self, place_id: &str) -> AppResult<PlacePhotosResponse>;

    /// Photo media for a photo resource name
    async fn photo_media(&self, photo_reference: &str) -> AppResult<PhotoMedia>;
}
