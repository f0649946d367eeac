//! Photo HTTP handlers
//!
//! Serves cached place photos and lists the photo references of a place.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::Response,
    Json,
};
use tokio::fs;

use crate::errors::{AppError, AppResult};
use crate::models::PhotoListResponse;
use crate::services::PhotoRequestMode;
use crate::web::{extractors::PhotoParams, AppState};

const PHOTO_CONTENT_TYPE: &str = "image/jpeg";
const PHOTO_CACHE_CONTROL: &str = "public, max-age=3600";

/// `GET|HEAD /photo?photo_reference=&place_id=`
///
/// GET returns the cached JPEG, fetching it from upstream on a miss. HEAD
/// only confirms presence and never fetches.
pub async fn get_photo(
    State(state): State<AppState>,
    method: Method,
    params: PhotoParams,
) -> AppResult<Response> {
    let mode = PhotoRequestMode::from(&method);
    let photo_path = state
        .photo_cache
        .resolve(&params.photo_reference, &params.place_id, mode)
        .await?;

    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PHOTO_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, PHOTO_CACHE_CONTROL);

    let response = match mode {
        PhotoRequestMode::PresenceCheck => {
            let metadata = fs::metadata(&photo_path).await.map_err(photo_io_error)?;
            builder
                .header(header::CONTENT_LENGTH, metadata.len())
                .body(Body::empty())
        }
        PhotoRequestMode::Content => {
            let data = fs::read(&photo_path).await.map_err(photo_io_error)?;
            builder
                .header(header::CONTENT_LENGTH, data.len())
                .body(Body::from(data))
        }
    };

    response.map_err(|e| AppError::internal(format!("Failed to build photo response: {e}")))
}

/// `GET /photos/{place_id}`
pub async fn list_photos(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> AppResult<Json<PhotoListResponse>> {
    let references = state.photo_cache.list_photos_for_place(&place_id).await?;
    Ok(Json(PhotoListResponse::from_references(references)))
}

/// A photo removed between lookup and read is reported as missing
fn photo_io_error(error: std::io::Error) -> AppError {
    if error.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found("Photo not found")
    } else {
        AppError::Io(error)
    }
}
