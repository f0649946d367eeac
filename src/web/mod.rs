//! Web layer module
//!
//! This module provides the HTTP interface for the places proxy. Handlers
//! are thin and delegate to the service layer for business logic.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers organized by domain
//! - **Responses**: Error mapping and standardized error bodies
//! - **Extractors**: Request validation and parameter extraction
//! - **Middleware**: Request logging

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    config::{Config, WebConfig},
    services::{IdeaMapper, PhotoCache},
};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;

pub use responses::{handle_error, ApiResponse};

/// Prefix shared by every maps endpoint
pub const API_PREFIX: &str = "/api/maps";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub photo_cache: PhotoCache,
    pub idea_mapper: IdeaMapper,
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, state: AppState) -> Result<Self> {
        let cors = cors_layer(&config.web)?;
        let app = create_router(state).layer(cors);

        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    config.web.host, config.web.port
                )
            })?;

        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware except CORS
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest(API_PREFIX, maps_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .with_state(state)
}

fn maps_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/photo",
            get(handlers::photos::get_photo).head(handlers::photos::get_photo),
        )
        .route("/photos/:place_id", get(handlers::photos::list_photos))
        .route("/details", post(handlers::ideas::get_idea_details))
}

/// CORS for the configured client origins; an empty list allows any origin
pub fn cors_layer(config: &WebConfig) -> Result<CorsLayer> {
    if config.cors_allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_configured_origins() {
        let config = WebConfig::default();
        assert!(cors_layer(&config).is_ok());

        let permissive = WebConfig {
            cors_allowed_origins: vec![],
            ..WebConfig::default()
        };
        assert!(cors_layer(&permissive).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let config = WebConfig {
            cors_allowed_origins: vec!["http://bad\norigin".to_string()],
            ..WebConfig::default()
        };
        assert!(cors_layer(&config).is_err());
    }
}
