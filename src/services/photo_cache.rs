//! Photo cache service
//!
//! Keeps at most one JPEG per place on local disk, keyed by the stable place
//! identifier rather than the rotating photo reference. A file at the
//! deterministic path is the only cache-hit signal; there is no expiry.
//!
//! Downloads are streamed into a uniquely named temp file beside the target
//! and renamed into place, so readers only ever see complete photos.
//! Concurrent misses for the same place may fetch twice; the last rename wins
//! and both writes carry the same bytes.

use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::sources::{PhotoByteStream, PhotoMedia, PlacesApi};

const PLACES_SUBDIR: &str = "places";
const PHOTO_EXTENSION: &str = "jpg";

/// How the caller wants a photo resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoRequestMode {
    /// Only confirm presence; never reaches the network
    PresenceCheck,
    /// Content is expected; a miss is fetched from upstream
    Content,
}

impl From<&axum::http::Method> for PhotoRequestMode {
    fn from(method: &axum::http::Method) -> Self {
        if method == axum::http::Method::HEAD {
            PhotoRequestMode::PresenceCheck
        } else {
            PhotoRequestMode::Content
        }
    }
}

#[derive(Clone)]
pub struct PhotoCache {
    cache_dir: PathBuf,
    places: Arc<dyn PlacesApi>,
}

impl PhotoCache {
    pub fn new(cache_dir: impl Into<PathBuf>, places: Arc<dyn PlacesApi>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            places,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub async fn ensure_storage_dirs(&self) -> AppResult<()> {
        fs::create_dir_all(self.cache_dir.join(PLACES_SUBDIR)).await?;
        Ok(())
    }

    /// Deterministic cache path for a place
    pub fn photo_path(&self, place_id: &str) -> PathBuf {
        self.cache_dir
            .join(PLACES_SUBDIR)
            .join(format!("{}.{}", encode_place_id(place_id), PHOTO_EXTENSION))
    }

    /// True iff a cached photo exists for the place
    pub async fn exists(&self, place_id: &str) -> bool {
        fs::metadata(self.photo_path(place_id))
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }

    /// Download the photo behind `photo_reference` and store it for `place_id`
    ///
    /// Returns false on any non-200 upstream response or local failure; the
    /// previously cached file, if any, is left untouched in that case.
    pub async fn fetch_and_store(&self, photo_reference: &str, place_id: &str) -> bool {
        match self.try_fetch_and_store(photo_reference, place_id).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to cache photo for place {}: {}", place_id, e);
                false
            }
        }
    }

    async fn try_fetch_and_store(&self, photo_reference: &str, place_id: &str) -> AppResult<bool> {
        let stream = match self.places.photo_media(photo_reference).await? {
            PhotoMedia::Available(stream) => stream,
            PhotoMedia::Unavailable { status } => {
                debug!(
                    "Upstream returned HTTP {} for photo of place {}",
                    status, place_id
                );
                return Ok(false);
            }
        };

        let photo_path = self.photo_path(place_id);
        if let Some(parent) = photo_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path =
            photo_path.with_extension(format!("{}.{}.part", PHOTO_EXTENSION, Uuid::new_v4().simple()));

        let written = match write_stream(&temp_path, stream).await {
            Ok(written) => written,
            Err(e) => {
                discard_temp_file(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&temp_path, &photo_path).await {
            discard_temp_file(&temp_path).await;
            return Err(e.into());
        }

        info!(
            "Cached photo for place {} ({} bytes) at {}",
            place_id,
            written,
            photo_path.display()
        );
        Ok(true)
    }

    /// Path of the cached photo, fetching it first when content is expected
    ///
    /// A presence check on a miss fails with NotFound without any upstream
    /// call.
    pub async fn resolve(
        &self,
        photo_reference: &str,
        place_id: &str,
        mode: PhotoRequestMode,
    ) -> AppResult<PathBuf> {
        let photo_path = self.photo_path(place_id);
        if self.exists(place_id).await {
            debug!("Photo cache hit for place {}", place_id);
            return Ok(photo_path);
        }

        match mode {
            PhotoRequestMode::PresenceCheck => Err(AppError::not_found("Photo not found")),
            PhotoRequestMode::Content => {
                if self.fetch_and_store(photo_reference, place_id).await {
                    Ok(photo_path)
                } else {
                    Err(AppError::not_found("Photo not found or Google API error"))
                }
            }
        }
    }

    /// Photo references of a place, in upstream order
    ///
    /// Caches the first photo as a side effect when the place has none cached
    /// yet. That fetch is best-effort and never affects the returned list.
    pub async fn list_photos_for_place(&self, place_id: &str) -> AppResult<Vec<String>> {
        let response = self.places.place_photos(place_id).await.map_err(|e| {
            warn!("Place details request for {} failed: {}", place_id, e);
            AppError::upstream_protocol(format!("failed to fetch photos for place '{place_id}'"))
        })?;

        let references = response.photo_references();

        if let Some(first) = references.first() {
            if !self.exists(place_id).await && !self.fetch_and_store(first, place_id).await {
                warn!("Could not cache first photo for place {}", place_id);
            }
        }

        Ok(references)
    }
}

/// Map a place identifier to a safe, collision-free filename stem
///
/// `[A-Za-z0-9-]` pass through, `_` becomes `__` and every other byte becomes
/// `_XX` (uppercase hex). The escape is reversible, so distinct identifiers
/// never share a cache file. The empty identifier maps to the lone `_`, which
/// no other identifier can produce.
pub fn encode_place_id(place_id: &str) -> String {
    if place_id.is_empty() {
        return "_".to_string();
    }

    let mut encoded = String::with_capacity(place_id.len());
    for byte in place_id.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' => encoded.push(char::from(byte)),
            b'_' => encoded.push_str("__"),
            other => encoded.push_str(&format!("_{other:02X}")),
        }
    }
    encoded
}

async fn write_stream(path: &Path, mut stream: PhotoByteStream) -> AppResult<u64> {
    let mut file = fs::File::create(path).await?;
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    file.sync_all().await?;
    Ok(written)
}

async fn discard_temp_file(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove temp file {}: {}", path.display(), e);
        }
    }
}
