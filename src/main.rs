//! Porchlight - portfolio health scoring and hurricane-season risk service.
//!
//! # API Endpoints
//!
//! - `POST /properties` - Record the latest snapshot for a property
//! - `GET /overview` - Full dashboard payload (score, streak, season, alerts)
//! - `GET /score` - Health score under a selectable weight profile
//! - `GET /streak` - Issue-free streak
//! - `GET /season` - Hurricane-season window for a date
//! - `GET /reports` - Inspection reports for an address (proxied)
//! - `POST /sync` - Pull the portfolio from the inspection backend
//! - `GET /health` - Health check

use std::env;
use std::net::SocketAddr;

use axum::{Router, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use porchlight::api::{
    AppState, get_overview, get_reports, get_score, get_season, get_streak, health_check,
    post_property, post_sync,
};
use porchlight::backend::InspectionBackendClient;
use porchlight::storage::Storage;

/// Default port if not specified via environment variable.
const DEFAULT_PORT: u16 = 3000;

/// Default database path if not specified via environment variable.
const DEFAULT_DB_PATH: &str = "sqlite:porchlight.db?mode=rwc";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("porchlight=info".parse()?))
        .init();

    // Load configuration from environment
    let port: u16 = env::var("PORCHLIGHT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let db_url =
        env::var("PORCHLIGHT_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    let backend = env::var("PORCHLIGHT_BACKEND_URL")
        .ok()
        .map(|url| InspectionBackendClient::new(&url));

    info!(
        port,
        db_url = %db_url,
        backend_configured = backend.is_some(),
        "Starting Porchlight server"
    );

    // Initialize storage
    let storage = Storage::new(&db_url).await?;
    info!("Database initialized");

    // Create application state
    let state = AppState { storage, backend };

    // Build router
    let app = Router::new()
        .route("/properties", post(post_property))
        .route("/overview", get(get_overview))
        .route("/score", get(get_score))
        .route("/streak", get(get_streak))
        .route("/season", get(get_season))
        .route("/reports", get(get_reports))
        .route("/sync", post(post_sync))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Porchlight is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
