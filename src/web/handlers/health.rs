//! Health check HTTP handler

use axum::{response::IntoResponse, Json};

use crate::web::responses::{ApiResponse, HealthResponse};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success(HealthResponse::healthy()))
}
