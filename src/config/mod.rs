use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS; an empty list allows any origin
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_photo_cache_path")]
    pub photo_cache_path: PathBuf,
}

/// Places provider endpoints and request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the legacy API family (text search)
    #[serde(default = "default_legacy_base_url")]
    pub legacy_base_url: String,
    /// Base URL of the newer API family (place details, photo media)
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,
    #[serde(default = "default_max_width_px")]
    pub max_width_px: u32,
    #[serde(default = "default_max_height_px")]
    pub max_height_px: u32,
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec![DEFAULT_CORS_ORIGIN.to_string()]
}

// Storage defaults
fn default_photo_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_PHOTO_CACHE_PATH)
}

// Upstream defaults
fn default_legacy_base_url() -> String {
    DEFAULT_LEGACY_BASE_URL.to_string()
}

fn default_places_base_url() -> String {
    DEFAULT_PLACES_BASE_URL.to_string()
}

fn default_max_width_px() -> u32 {
    DEFAULT_MAX_WIDTH_PX
}

fn default_max_height_px() -> u32 {
    DEFAULT_MAX_HEIGHT_PX
}

fn default_request_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_REQUEST_TIMEOUT).unwrap_or(Duration::from_secs(30))
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: default_cors_allowed_origins(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            photo_cache_path: default_photo_cache_path(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            legacy_base_url: default_legacy_base_url(),
            places_base_url: default_places_base_url(),
            max_width_px: default_max_width_px(),
            max_height_px: default_max_height_px(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            storage: StorageConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Config file to load: `explicit` if given, else `CONFIG_FILE`, else
    /// `config.toml`
    pub fn file_path(explicit: Option<&str>) -> String {
        resolve_file_path(explicit, std::env::var(CONFIG_FILE_ENV_VAR).ok())
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)
                .with_context(|| format!("Failed to read config file {config_file}"))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {config_file}"))
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }

    /// Read the places API key from the process environment
    ///
    /// The key is never stored in the config file.
    pub fn api_key_from_env() -> Result<String> {
        API_KEY_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|key| !key.trim().is_empty()))
            .with_context(|| {
                format!(
                    "No places API key found; set one of: {}",
                    API_KEY_ENV_VARS.join(", ")
                )
            })
    }
}

fn resolve_file_path(explicit: Option<&str>, from_env: Option<String>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| from_env.filter(|path| !path.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [web]
            port = 9000

            [upstream]
            request_timeout = "5s"
            "#,
        )
        .unwrap();

        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, DEFAULT_HOST);
        assert_eq!(config.web.cors_allowed_origins, vec![DEFAULT_CORS_ORIGIN]);
        assert_eq!(config.storage.photo_cache_path, PathBuf::from(DEFAULT_PHOTO_CACHE_PATH));
        assert_eq!(config.upstream.request_timeout, Duration::from_secs(5));
        assert_eq!(config.upstream.max_width_px, 4000);
        assert_eq!(config.upstream.max_height_px, 3000);
    }

    #[test]
    fn test_request_timeout_accepts_seconds() {
        let config: Config = toml::from_str("[upstream]\nrequest_timeout = 12\n").unwrap();
        assert_eq!(config.upstream.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_invalid_request_timeout_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[upstream]\nrequest_timeout = \"soon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let config = Config::load_from_file(path_str).unwrap();
        assert_eq!(config.web.port, DEFAULT_PORT);
        assert!(path.exists());

        let reloaded = Config::load_from_file(path_str).unwrap();
        assert_eq!(reloaded.upstream.places_base_url, DEFAULT_PLACES_BASE_URL);
        assert_eq!(reloaded.upstream.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_file_path_precedence() {
        assert_eq!(
            resolve_file_path(Some("cli.toml"), Some("env.toml".to_string())),
            "cli.toml"
        );
        assert_eq!(
            resolve_file_path(None, Some("env.toml".to_string())),
            "env.toml"
        );
        assert_eq!(resolve_file_path(None, Some("  ".to_string())), DEFAULT_CONFIG_FILE);
        assert_eq!(resolve_file_path(None, None), DEFAULT_CONFIG_FILE);
    }
}
