use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use the library instead of redeclaring modules
use places_proxy::{
    config::Config,
    services::{IdeaMapper, PhotoCache},
    sources::{GooglePlacesClient, PlacesApi},
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "places-proxy")]
#[command(version)]
#[command(about = "A places and photos proxy service with an on-disk photo cache")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (falls back to $CONFIG_FILE, then config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Photo cache directory (overrides config file)
    #[arg(long, value_name = "DIR")]
    photo_cache_path: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("places_proxy={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Places Proxy Service v{}", env!("CARGO_PKG_VERSION"));

    let config_file = Config::file_path(cli.config.as_deref());
    let mut config = Config::load_from_file(&config_file)?;
    info!("Configuration loaded from: {}", config_file);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(photo_cache_path) = cli.photo_cache_path {
        config.storage.photo_cache_path = photo_cache_path;
    }

    let api_key = Config::api_key_from_env()?;
    let places: Arc<dyn PlacesApi> = Arc::new(GooglePlacesClient::new(api_key, &config.upstream)?);
    info!(
        "Places client initialized (timeout {:?}, max photo size {}x{})",
        config.upstream.request_timeout, config.upstream.max_width_px, config.upstream.max_height_px
    );

    let photo_cache = PhotoCache::new(config.storage.photo_cache_path.clone(), places.clone());
    photo_cache.ensure_storage_dirs().await?;
    info!(
        "Photo cache ready at: {}",
        config.storage.photo_cache_path.display()
    );

    let idea_mapper = IdeaMapper::new(places);

    let web_server = WebServer::new(
        &config,
        AppState {
            photo_cache,
            idea_mapper,
        },
    )?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
