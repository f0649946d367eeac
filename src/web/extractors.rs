//! Request extractors and validation
//!
//! Wraps axum's built-in extractors so that malformed input is reported with
//! the service's error body instead of axum's plain-text rejections.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::models::PhotoQuery;

/// Both photo parameters, validated as present and non-empty
#[derive(Debug, Clone)]
pub struct PhotoParams {
    pub photo_reference: String,
    pub place_id: String,
}

impl PhotoParams {
    fn from_query(query: PhotoQuery) -> Result<Self, AppError> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        match (non_empty(query.photo_reference), non_empty(query.place_id)) {
            (Some(photo_reference), Some(place_id)) => Ok(Self {
                photo_reference,
                place_id,
            }),
            _ => Err(AppError::validation(
                "photo_reference and place_id are required",
            )),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PhotoParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query): Query<PhotoQuery> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid photo parameters: {e}")))?;

        Self::from_query(query)
    }
}

/// JSON body extractor that reports rejections as validation errors
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                AppError::validation(format!("Invalid request body: {}", rejection.body_text()))
            })?;

        Ok(Self(value))
    }
}
