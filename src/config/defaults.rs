/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Config file location
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const CONFIG_FILE_ENV_VAR: &str = "CONFIG_FILE";

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

// Storage defaults
pub const DEFAULT_PHOTO_CACHE_PATH: &str = "./data/photos";

// Upstream defaults
pub const DEFAULT_LEGACY_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const DEFAULT_MAX_WIDTH_PX: u32 = 4000;
pub const DEFAULT_MAX_HEIGHT_PX: u32 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";

// API key environment variables, checked in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GOOGLE_MAPS_API_KEY", "VITE_GOOGLE_MAPS_API_KEY"];
