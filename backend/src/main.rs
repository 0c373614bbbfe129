//! Disaster Early Warning System - Backend Server
//!
//! Proxies live weather, scores disaster risk from it, and manages
//! user-published disaster alerts.

use axum::{http::HeaderValue, routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cache;
mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;
mod storage;

#[cfg(test)]
mod tests;

pub use crate::config::Config;

use crate::cache::WeatherCache;
use crate::config::{LogFormat, StorageBackend};
use crate::external::{WeatherClient, WeatherProvider};
use crate::services::{AlertService, DisasterService, WeatherService};
use crate::storage::{AlertRepository, InMemoryAlertRepository, JsonFileAlertRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather_service: WeatherService,
    pub alert_service: AlertService,
    pub disaster_service: DisasterService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        provider: Arc<dyn WeatherProvider>,
        repository: Arc<dyn AlertRepository>,
    ) -> Self {
        let cache = Arc::new(WeatherCache::new(
            config.weather.cache_ttl(),
            config.weather.cache_capacity,
        ));
        let weather_service = WeatherService::new(provider, cache);

        Self {
            config: Arc::new(config),
            disaster_service: DisasterService::new(weather_service.clone()),
            weather_service,
            alert_service: AlertService::new(repository),
            started_at: Instant::now(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(config.log.format);

    tracing::info!("Starting Disaster Early Warning System");
    tracing::info!("Environment: {}", config.environment);

    if config.weather.api_key.is_empty() {
        tracing::warn!("No weather API key configured; weather and prediction endpoints will fail");
    }

    let provider = WeatherClient::new(
        config.weather.api_key.clone(),
        config.weather.api_endpoint.clone(),
        config.weather.request_timeout(),
    )?;

    let repository: Arc<dyn AlertRepository> = match config.storage.backend {
        StorageBackend::File => {
            let repository = JsonFileAlertRepository::open(&config.storage.alerts_path).await?;
            tracing::info!("Storing alerts in {}", repository.path().display());
            Arc::new(repository)
        }
        StorageBackend::Memory => {
            tracing::info!("Storing alerts in memory");
            Arc::new(InMemoryAlertRepository::new())
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config, Arc::new(provider), repository);

    // Build application
    let app = create_app(state)?;

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dews_server=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> anyhow::Result<Router> {
    // CORS configuration
    let origin = state.config.cors.allowed_origin.trim();
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::exact(origin.parse::<HeaderValue>()?)
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state))
}
