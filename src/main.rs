//! e-ICT Server - School Equipment Booking System
//!
//! A Rust REST API server for managing shared ICT equipment bookings.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eict_server::{
    api,
    config::AppConfig,
    services::Services,
    store::BookingStore,
    sync::{self, sheet::SheetClient, RecordStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("eict_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting e-ICT Server v{}", env!("CARGO_PKG_VERSION"));

    // Connect to the remote record store and load the startup snapshot.
    // A failed or unconfigured remote is not fatal: start empty and let the
    // session be the source of truth.
    let sheet: Arc<dyn RecordStore> =
        Arc::new(SheetClient::new(&config.sheet).expect("Failed to create sheet client"));
    let bookings = match sheet.fetch_all().await {
        Ok(bookings) => bookings,
        Err(e) => {
            tracing::warn!(error = %e, "could not load remote snapshot; starting empty");
            Vec::new()
        }
    };
    tracing::info!("Loaded {} booking(s) from the record store", bookings.len());

    let store = Arc::new(BookingStore::load(bookings));

    // Background sync worker: local mutations are mirrored fire-and-forget
    let (sync_handle, _sync_worker) = sync::spawn_worker(sheet);

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let services = Services::new(store, sync_handle);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment catalog
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/catalog", get(api::equipment::get_catalog))
        // Bookings
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/drafts", post(api::bookings::create_draft))
        .route("/bookings/overview", get(api::bookings::booking_overview))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id", delete(api::bookings::delete_booking))
        .route("/bookings/:id/submit", post(api::bookings::submit_draft))
        .route("/bookings/:id/approve", post(api::bookings::approve_booking))
        .route("/bookings/:id/reject", post(api::bookings::reject_booking))
        .route("/bookings/:id/return", post(api::bookings::return_booking))
        // Availability
        .route("/availability", get(api::availability::check_availability))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
